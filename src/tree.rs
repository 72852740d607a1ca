use std::cmp::Ordering;

use crate::codes::Code;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_queue::MinQueue;
use crate::packer::PackedBytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: char,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => *freq,
        }
    }
}

/// Prefix-code tree. A table with one distinct symbol gives a bare leaf root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

// Heap entry. `seq` is the insertion order and breaks frequency ties.
struct Pending {
    seq: usize,
    node: Node,
}

fn lighter_then_older(a: &Pending, b: &Pending) -> Ordering {
    a.node
        .weight()
        .cmp(&b.node.weight())
        .then(a.seq.cmp(&b.seq))
}

impl HuffmanTree {
    /// Greedy merge of the two lightest nodes until one remains.
    ///
    /// Leaves are queued in ascending symbol order and every merged node is
    /// queued after all existing entries, so among equal weights the older
    /// node is taken first. The first node taken becomes the left child.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        if table.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut queue = MinQueue::with_capacity(table.len(), lighter_then_older);
        let mut seq = 0;
        for (symbol, freq) in table.iter() {
            queue.push(Pending { seq, node: Node::Leaf { symbol, freq } });
            seq += 1;
        }

        while queue.len() > 1 {
            let (Some(left), Some(right)) = (queue.pop(), queue.pop()) else {
                break;
            };
            let node = Node::Internal {
                freq: left.node.weight() + right.node.weight(),
                left: Box::new(left.node),
                right: Box::new(right.node),
            };
            queue.push(Pending { seq, node });
            seq += 1;
        }

        let root = queue.pop().ok_or(HuffmanError::EmptyInput)?.node;
        tracing::debug!(leaves = table.len(), weight = root.weight(), "built huffman tree");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total frequency, equal to the input length in symbols.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Leaf set in left-to-right order.
    pub fn leaves(&self) -> Vec<(char, u64)> {
        let mut out = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { symbol, freq } => out.push((*symbol, *freq)),
                Node::Internal { left, right, .. } => {
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }
        out
    }

    /// Follows `code` from the root; returns the leaf it ends on.
    pub fn resolve(&self, code: &Code) -> Option<(char, u64)> {
        if let Node::Leaf { symbol, freq } = &self.root {
            // degenerate tree: the lone symbol is coded as a single 0
            return (code.bits() == [false]).then_some((*symbol, *freq));
        }
        let mut node = &self.root;
        for &bit in code.bits() {
            node = match node {
                Node::Internal { left, right, .. } => {
                    if bit {
                        right.as_ref()
                    } else {
                        left.as_ref()
                    }
                }
                Node::Leaf { .. } => return None,
            };
        }
        match node {
            Node::Leaf { symbol, freq } => Some((*symbol, *freq)),
            Node::Internal { .. } => None,
        }
    }

    /// Decodes packed output, given the valid bit count kept out of band.
    pub fn decode(&self, packed: &PackedBytes) -> Result<String> {
        let mut text = String::new();

        if let Node::Leaf { symbol, .. } = &self.root {
            for bit in packed.bits() {
                if bit {
                    return Err(HuffmanError::InvalidCode);
                }
                text.push(*symbol);
            }
            return Ok(text);
        }

        let mut node = &self.root;
        for bit in packed.bits() {
            if let Node::Internal { left, right, .. } = node {
                node = if bit { right.as_ref() } else { left.as_ref() };
            }
            if let Node::Leaf { symbol, .. } = node {
                text.push(*symbol);
                node = &self.root;
            }
        }

        if !std::ptr::eq(node, &self.root) {
            return Err(HuffmanError::TruncatedStream);
        }
        Ok(text)
    }
}

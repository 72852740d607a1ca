use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Root-to-leaf path, `false` for a left edge and `true` for a right edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Symbol to code mapping derived from one tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    /// Depth-first walk with an explicit stack. A bare-leaf root is given
    /// the one-bit code `0` so every symbol contributes at least one bit.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();

        if let Node::Leaf { symbol, .. } = tree.root() {
            codes.insert(*symbol, Code(vec![false]));
            return Self { codes };
        }

        let mut stack = vec![(tree.root(), Vec::new())];
        while let Some((node, prefix)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes.insert(*symbol, Code(prefix));
                }
                Node::Internal { left, right, .. } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push(true);
                    stack.push((right.as_ref(), right_prefix));

                    let mut left_prefix = prefix;
                    left_prefix.push(false);
                    stack.push((left.as_ref(), left_prefix));
                }
            }
        }

        tracing::debug!(symbols = codes.len(), "generated code table");
        Self { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> + '_ {
        self.codes.iter().map(|(&ch, code)| (ch, code))
    }

    /// Bit length of the encoding of an input with these frequencies.
    pub fn encoded_len(&self, table: &FrequencyTable) -> Result<u64> {
        table.iter().try_fold(0u64, |acc, (symbol, freq)| -> Result<u64> {
            let code = self.get(symbol).ok_or(HuffmanError::UnknownSymbol(symbol))?;
            Ok(acc + freq * code.len() as u64)
        })
    }

    /// Expected code length in bits per symbol.
    pub fn average_length(&self, table: &FrequencyTable) -> Result<f64> {
        let total = table.total();
        if total == 0 {
            return Err(HuffmanError::EmptyInput);
        }
        Ok(self.encoded_len(table)? as f64 / total as f64)
    }
}

impl FromIterator<(char, Code)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (char, Code)>>(iter: I) -> Self {
        Self { codes: iter.into_iter().collect() }
    }
}

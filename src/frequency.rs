use std::collections::BTreeMap;

use crate::error::{HuffmanError, Result};

/// Views a raw payload as text; anything but UTF-8 is `InvalidInput`.
pub fn as_text(data: &[u8]) -> Result<&str> {
    std::str::from_utf8(data).map_err(|_| HuffmanError::InvalidInput)
}

/// Occurrence count of every distinct symbol in one input.
///
/// Backed by an ordered map so that iteration, and therefore tree
/// construction, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    pub fn from_text(text: &str) -> Self {
        text.chars().collect()
    }

    /// Counts a raw payload. The whole payload is validated as UTF-8 before
    /// a single symbol is counted.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::from_text(as_text(data)?))
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the input length in symbols.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&ch, &freq)| (ch, freq))
    }
}

impl FromIterator<char> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for ch in iter {
            *counts.entry(ch).or_insert(0) += 1;
        }
        Self { counts }
    }
}

use crate::codes::CodeTable;
use crate::error::{HuffmanError, Result};

/// Concatenated codes of an input, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedStream {
    bits: Vec<bool>,
}

impl EncodedStream {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl std::fmt::Display for EncodedStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Replaces every symbol of `text` by its code. The table may come from a
/// different input, so each lookup is checked.
pub fn encode(text: &str, codes: &CodeTable) -> Result<EncodedStream> {
    let mut bits = Vec::new();
    for symbol in text.chars() {
        let code = codes.get(symbol).ok_or(HuffmanError::UnknownSymbol(symbol))?;
        bits.extend_from_slice(code.bits());
    }
    tracing::debug!(bits = bits.len(), "encoded input");
    Ok(EncodedStream { bits })
}

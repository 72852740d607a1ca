use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::codes::CodeTable;
use crate::encoder::{self, EncodedStream};
use crate::error::{HuffmanError, Result};
use crate::frequency::{self, FrequencyTable};
use crate::packer::{self, PackedBytes};
use crate::tree::HuffmanTree;

/// Diagnostics for one run. Reported to the caller, never written to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompressionReport {
    pub symbols: u64,
    pub distinct_symbols: usize,
    pub encoded_bits: u64,
    pub packed_bytes: usize,
    pub valid_bits_in_last_byte: u8,
    /// encoded bits / (symbols * 8)
    pub ratio: f64,
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "symbols:          {}", self.symbols)?;
        writeln!(f, "distinct symbols: {}", self.distinct_symbols)?;
        writeln!(f, "original bits:    {}", self.symbols * 8)?;
        writeln!(f, "encoded bits:     {}", self.encoded_bits)?;
        writeln!(
            f,
            "packed bytes:     {} ({} valid bits in last byte)",
            self.packed_bytes, self.valid_bits_in_last_byte
        )?;
        write!(f, "compression ratio: {:.4}", self.ratio)
    }
}

/// Every intermediate product of one compression, kept so callers can
/// inspect codes or decode the packed bits in memory.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub frequencies: FrequencyTable,
    pub tree: HuffmanTree,
    pub codes: CodeTable,
    pub stream: EncodedStream,
    pub packed: PackedBytes,
}

impl Compressed {
    pub fn report(&self) -> CompressionReport {
        let symbols = self.frequencies.total();
        let encoded_bits = self.stream.len() as u64;
        CompressionReport {
            symbols,
            distinct_symbols: self.frequencies.len(),
            encoded_bits,
            packed_bytes: self.packed.as_bytes().len(),
            valid_bits_in_last_byte: self.packed.valid_bits_in_last_byte(),
            ratio: encoded_bits as f64 / (symbols * 8) as f64,
        }
    }
}

/// Runs collector, tree builder, code generator, encoder and packer in order.
pub fn compress_text(text: &str) -> Result<Compressed> {
    let frequencies = FrequencyTable::from_text(text);
    tracing::debug!(
        symbols = frequencies.total(),
        distinct = frequencies.len(),
        "collected frequencies"
    );
    let tree = HuffmanTree::build(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);
    let stream = encoder::encode(text, &codes)?;
    let packed = packer::pack(&stream)?;
    Ok(Compressed { frequencies, tree, codes, stream, packed })
}

/// Same as [`compress_text`] for a raw payload, which must be UTF-8.
pub fn compress_bytes(data: &[u8]) -> Result<Compressed> {
    compress_text(frequency::as_text(data)?)
}

/// Compresses the text file at `input` and writes the raw packed bits to
/// `output`. No header or code table goes into `output`.
pub fn compress_file(input: &Path, output: &Path) -> Result<Compressed> {
    let data = fs::read(input)?;
    if data.is_empty() {
        return Err(HuffmanError::EmptyInput);
    }
    let compressed = compress_bytes(&data)?;
    compressed.packed.write_to_path(output)?;

    let report = compressed.report();
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        symbols = report.symbols,
        encoded_bits = report.encoded_bits,
        ratio = report.ratio,
        "compressed file"
    );
    Ok(compressed)
}

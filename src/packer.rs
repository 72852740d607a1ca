use std::io::{self, Write};
use std::path::Path;

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use tempfile::NamedTempFile;

use crate::encoder::EncodedStream;
use crate::error::{HuffmanError, Result};

/// Bits packed MSB-first into bytes, last byte zero-padded on the right.
///
/// Only `bytes` ever reaches a sink. `bit_len` has to be kept by the caller
/// if the output is to be decoded later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBytes {
    bytes: Vec<u8>,
    bit_len: u64,
}

impl PackedBytes {
    /// Wraps bytes read back from a sink together with the bit count that
    /// was kept aside when they were written.
    pub fn from_parts(bytes: Vec<u8>, bit_len: u64) -> Self {
        let bit_len = bit_len.min(bytes.len() as u64 * 8);
        Self { bytes, bit_len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Number of meaningful bits in the final byte, 1 to 8. Zero only for
    /// an empty buffer built with [`PackedBytes::from_parts`].
    pub fn valid_bits_in_last_byte(&self) -> u8 {
        match self.bit_len % 8 {
            0 if self.bit_len > 0 => 8,
            rem => rem as u8,
        }
    }

    /// The meaningful bits, padding excluded.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bytes
            .iter()
            .flat_map(|byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
            .take(self.bit_len as usize)
    }

    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        sink.write_all(&self.bytes).map_err(HuffmanError::SinkWrite)?;
        sink.flush().map_err(HuffmanError::SinkWrite)
    }

    /// Writes to a uniquely named temp file in the same directory and
    /// persists it over `path`. The temp file is removed on every failure.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(HuffmanError::SinkWrite)?;
        self.write_to(temp.as_file_mut())?;
        temp.persist(path).map_err(|e| HuffmanError::SinkWrite(e.error))?;
        tracing::debug!(path = %path.display(), bytes = self.bytes.len(), "wrote packed output");
        Ok(())
    }
}

pub fn pack(stream: &EncodedStream) -> Result<PackedBytes> {
    if stream.is_empty() {
        return Err(HuffmanError::EmptyStream);
    }
    let bytes = pack_bits(stream.bits()).map_err(HuffmanError::Io)?;
    Ok(PackedBytes {
        bytes,
        bit_len: stream.len() as u64,
    })
}

fn pack_bits(bits: &[bool]) -> io::Result<Vec<u8>> {
    let mut writer = BitWriter::endian(Vec::with_capacity(bits.len().div_ceil(8)), BigEndian);
    for &bit in bits {
        writer.write_bit(bit)?;
    }
    writer.byte_align()?;
    Ok(writer.into_writer())
}

//! # huffpack
//!
//! Huffman coding of text with raw bit packing.
//!
//! The pipeline runs five stages in order: frequency collection, tree
//! construction, code generation, encoding and bit packing. The packed output
//! carries no header, code table or bit count; keep the [`CodeTable`] (or the
//! [`HuffmanTree`]) and [`PackedBytes::bit_len`] if you need to decode later.
//!
//! ```rust
//! use huffpack::compress_text;
//!
//! let compressed = compress_text("abracadabra")?;
//! assert_eq!(compressed.stream.len(), 23);
//! assert_eq!(compressed.packed.as_bytes().len(), 3);
//! assert_eq!(compressed.tree.decode(&compressed.packed)?, "abracadabra");
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```

pub mod codes;
pub mod compress;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod min_queue;
pub mod packer;
pub mod tree;

pub use codes::{Code, CodeTable};
pub use compress::{Compressed, CompressionReport, compress_bytes, compress_file, compress_text};
pub use encoder::{EncodedStream, encode};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use packer::{PackedBytes, pack};
pub use tree::{HuffmanTree, Node};

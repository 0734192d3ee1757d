//! Streaming, chunk-level reader and writer for PNG files.
//!
//! This crate works on the container structure of PNG only: the signature and
//! the sequence of length-prefixed, CRC-protected chunks that follows it. It
//! never inflates or decodes image data.
//!
//! # Design Principles
//!
//! - **Streaming**: One chunk in memory at a time, strictly forward
//! - **Strict framing**: Bad lengths, non-letter types and short reads are errors
//! - **Permissive CRC**: Stored CRCs are reported, never enforced on read
//! - **Explicit re-signing**: Mutated chunks get a fresh CRC before writing
//!
//! # Quick Start
//!
//! Extract the header chunk of a PNG held in memory:
//!
//! ```
//! use png_chunk_io::{extract_chunk, test_utils::minimal_indexed_png, ChunkType, ExtractOptions};
//! use std::io::Cursor;
//!
//! # fn main() -> png_chunk_io::Result<()> {
//! let mut source = Cursor::new(minimal_indexed_png());
//! let mut ihdr = Vec::new();
//!
//! let outcome = extract_chunk(&mut source, &mut ihdr, &ExtractOptions::new(ChunkType::IHDR).raw())?;
//! assert!(outcome.is_found());
//! assert_eq!(ihdr.len(), 13);
//! # Ok(())
//! # }
//! ```
//!
//! # Chunk-Level API
//!
//! For custom pipelines, use the reader and writer directly:
//!
//! ```
//! use png_chunk_io::{
//!     is_png_stream, test_utils::minimal_indexed_png, write_chunk_record, write_signature,
//!     ChunkReader,
//! };
//! use std::io::Cursor;
//!
//! # fn main() -> png_chunk_io::Result<()> {
//! let mut source = Cursor::new(minimal_indexed_png());
//! assert!(is_png_stream(&mut source)?);
//!
//! // Copy everything except ancillary chunks
//! let mut output = Vec::new();
//! write_signature(&mut output)?;
//! for chunk in ChunkReader::new(&mut source) {
//!     let chunk = chunk?;
//!     if chunk.chunk_type().is_critical() {
//!         write_chunk_record(&mut output, &chunk)?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod chunk;
mod chunk_type;
#[cfg(feature = "cli")]
pub mod cli;
mod crc;
mod error;
mod pipeline;
pub mod plte;
mod reader;
pub mod shuffle;
mod signature;
mod writer;

pub use chunk::{Chunk, CHUNK_OVERHEAD, MAX_CHUNK_LENGTH};
pub use chunk_type::{ChunkType, KNOWN_CHUNK_TYPES};
pub use crc::crc32;
pub use error::{Error, Result};
pub use pipeline::{
    extract_chunk, shuffle_stream, ExtractFormat, ExtractOptions, Extraction, ShuffleOptions,
    ShuffleReport,
};
pub use plte::{Palette, Rgb};
pub use reader::{read_chunk, ChunkReader};
pub use shuffle::{OsRandom, RandomSource};
pub use signature::{
    is_png_stream, locate_signature, scan_for_signature, write_signature, SignatureSearch,
    PNG_SIGNATURE,
};
pub use writer::{write_chunk, write_chunk_record};

// Test utilities - only compiled for tests or when explicitly enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

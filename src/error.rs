//! Error types for png-chunk-io

use std::io;

/// Result type for png-chunk-io operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while framing, reading or writing PNG chunks
///
/// Only malformed framing is fatal. A CRC that does not match its chunk is
/// never reported here; see [`Chunk::crc_is_valid`](crate::Chunk::crc_is_valid).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error other than a short read
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Not enough data to read the chunk length or type
    #[error("Not enough data to read chunk header")]
    TruncatedHeader,

    /// Chunk length does not fit in a signed 32-bit integer
    #[error("Chunk length is too big ({length})")]
    LengthOverflow { length: u32 },

    /// Chunk type contains a byte that is not an ASCII letter
    #[error("Invalid chunk type {bytes:02X?}")]
    InvalidType { bytes: [u8; 4] },

    /// Not enough data to read the chunk payload
    #[error("Not enough data to read chunk data: expected {expected} bytes, got {actual}")]
    TruncatedData { expected: u32, actual: usize },

    /// Not enough data to read the chunk CRC
    #[error("Not enough data to read chunk CRC")]
    TruncatedCrc,

    /// PLTE payload length is not a multiple of 3
    #[error("Invalid PLTE chunk: length {length} is not a multiple of 3")]
    InvalidPaletteLength { length: usize },

    /// PNG signature could not be located
    #[error("not a PNG file")]
    SignatureNotFound,

    /// The output stream refused the data
    #[error("Write failed: {0}")]
    WriteFailure(#[source] io::Error),

    /// Buffer for a chunk payload could not be reserved
    #[error("Could not allocate {length} bytes for chunk data")]
    AllocationFailure { length: u32 },

    /// The operating system random source failed
    #[error("Random source failed: {0}")]
    Random(#[from] getrandom::Error),

    /// Chunk name is not in the known chunk-type table
    #[error("{0}: invalid chunk")]
    UnknownChunkType(String),
}

//! Chunk type codes and the table of registered chunk names

use crate::error::{Error, Result};
use std::fmt;

/// Bit that distinguishes lowercase from uppercase ASCII letters
const CASE_BIT: u8 = 0x20;

/// A four-letter PNG chunk type such as `IHDR` or `tEXt`
///
/// A `ChunkType` always holds four ASCII letters. The case of each letter
/// encodes a property bit (ancillary, private, reserved, safe-to-copy); these
/// are exposed for inspection but never used for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType([u8; 4]);

impl ChunkType {
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    pub const PLTE: ChunkType = ChunkType(*b"PLTE");
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    pub const IEND: ChunkType = ChunkType(*b"IEND");

    /// Create a chunk type from raw bytes
    ///
    /// Fails with [`Error::InvalidType`] if any byte is not an ASCII letter.
    pub fn new(bytes: [u8; 4]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_alphabetic) {
            Ok(Self(bytes))
        } else {
            Err(Error::InvalidType { bytes })
        }
    }

    /// Look up a chunk type by its name in [`KNOWN_CHUNK_TYPES`]
    ///
    /// The comparison is case-sensitive: `"iend"` is not `IEND`.
    pub fn from_name(name: &str) -> Result<Self> {
        KNOWN_CHUNK_TYPES
            .iter()
            .copied()
            .find(|chunk_type| chunk_type.as_bytes() == name.as_bytes())
            .ok_or_else(|| Error::UnknownChunkType(name.to_string()))
    }

    /// The raw type bytes as they appear on the wire
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// The type as a string slice
    pub fn as_str(&self) -> &str {
        // Always ASCII letters, so always valid UTF-8
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Whether this chunk is critical (uppercase first letter)
    pub fn is_critical(&self) -> bool {
        self.0[0] & CASE_BIT == 0
    }

    /// Whether this chunk is public (uppercase second letter)
    pub fn is_public(&self) -> bool {
        self.0[1] & CASE_BIT == 0
    }

    /// Whether the reserved bit is clear, as required by the current PNG version
    pub fn is_reserved_bit_valid(&self) -> bool {
        self.0[2] & CASE_BIT == 0
    }

    /// Whether editors that do not recognize this chunk may copy it (lowercase last letter)
    pub fn is_safe_to_copy(&self) -> bool {
        self.0[3] & CASE_BIT != 0
    }
}

impl TryFrom<[u8; 4]> for ChunkType {
    type Error = Error;

    fn try_from(bytes: [u8; 4]) -> Result<Self> {
        Self::new(bytes)
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered PNG chunk types, in the order the PNG specification lists them
///
/// This is a fixed table; nothing mutates it at runtime.
pub const KNOWN_CHUNK_TYPES: &[ChunkType] = &[
    // Critical chunks
    ChunkType(*b"IHDR"),
    ChunkType(*b"PLTE"),
    ChunkType(*b"IDAT"),
    ChunkType(*b"IEND"),
    // Transparency and color space
    ChunkType(*b"tRNS"),
    ChunkType(*b"cHRM"),
    ChunkType(*b"gAMA"),
    ChunkType(*b"iCCP"),
    ChunkType(*b"sBIT"),
    ChunkType(*b"sRGB"),
    ChunkType(*b"cICP"),
    ChunkType(*b"mDCv"),
    ChunkType(*b"cLLi"),
    // Text
    ChunkType(*b"iTXt"),
    ChunkType(*b"tEXt"),
    ChunkType(*b"zTXt"),
    // Miscellaneous
    ChunkType(*b"bKGD"),
    ChunkType(*b"hIST"),
    ChunkType(*b"pHYs"),
    ChunkType(*b"sPLT"),
    ChunkType(*b"eXIf"),
    ChunkType(*b"tIME"),
    // Animation (APNG)
    ChunkType(*b"acTL"),
    ChunkType(*b"fcTL"),
    ChunkType(*b"fdAT"),
    // Registered extensions
    ChunkType(*b"oFFs"),
    ChunkType(*b"pCAL"),
    ChunkType(*b"sCAL"),
    ChunkType(*b"gIFg"),
    ChunkType(*b"gIFx"),
    ChunkType(*b"gIFt"),
    ChunkType(*b"sTER"),
    ChunkType(*b"dSIG"),
    // Content provenance manifest
    ChunkType(*b"caBX"),
];

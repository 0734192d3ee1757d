//! Test utilities for building PNG byte streams.
//!
//! This module provides helpers for tests and fuzz targets:
//! - Framed chunk builders with correct or deliberately wrong CRCs
//! - A minimal indexed-color PNG (IHDR + PLTE + IDAT + IEND)
//! - A scripted [`RandomSource`] for deterministic palette shuffles
//!
//! # Usage
//!
//! ```
//! use png_chunk_io::test_utils::*;
//!
//! let png = png_from_chunks(&[
//!     framed_chunk(b"IHDR", &[0; 13], None),
//!     framed_chunk(b"IEND", &[], None),
//! ]);
//! assert_eq!(png.len(), 8 + 25 + 12);
//! ```

use crate::{error::Result, shuffle::RandomSource, signature::PNG_SIGNATURE};

/// IHDR payload of a 2x1 image, 8-bit indexed color
pub const INDEXED_IHDR: [u8; 13] = [
    0x00, 0x00, 0x00, 0x02, // Width: 2
    0x00, 0x00, 0x00, 0x01, // Height: 1
    0x08, // Bit depth: 8
    0x03, // Color type: indexed
    0x00, // Compression: deflate
    0x00, // Filter: adaptive
    0x00, // Interlace: none
];

/// Two-entry palette: red, then blue
pub const TWO_ENTRY_PALETTE: [u8; 6] = [0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF];

/// zlib stream for one scanline: filter byte 0, then indices 0 and 1
pub const INDEXED_IDAT: [u8; 14] = [
    0x78, 0x01, // zlib header
    0x01, 0x03, 0x00, 0xFC, 0xFF, // final stored block, 3 bytes
    0x00, 0x00, 0x01, // scanline
    0x00, 0x04, 0x00, 0x02, // Adler-32
];

/// Frame a chunk as `length | type | data | crc`
///
/// With `crc` set to `None` the correct CRC is computed; pass `Some` to
/// produce a chunk with an arbitrary (possibly wrong) CRC.
pub fn framed_chunk(chunk_type: &[u8; 4], data: &[u8], crc: Option<u32>) -> Vec<u8> {
    let crc = crc.unwrap_or_else(|| {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(chunk_type);
        hasher.update(data);
        hasher.finalize()
    });

    let mut out = Vec::with_capacity(12 + data.len());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc.to_be_bytes());
    out
}

/// Signature followed by the given framed chunks
pub fn png_from_chunks(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = PNG_SIGNATURE.to_vec();
    for chunk in chunks {
        out.extend_from_slice(chunk);
    }
    out
}

/// Signature + IHDR + PLTE (2 entries) + IDAT + IEND, all with valid CRCs
///
/// Offsets: IHDR record at 8..33 (payload 16..29), PLTE record at 33..51
/// (payload 41..47), IDAT record at 51..77, IEND record at 77..89.
pub fn minimal_indexed_png() -> Vec<u8> {
    png_from_chunks(&[
        framed_chunk(b"IHDR", &INDEXED_IHDR, None),
        framed_chunk(b"PLTE", &TWO_ENTRY_PALETTE, None),
        framed_chunk(b"IDAT", &INDEXED_IDAT, None),
        framed_chunk(b"IEND", &[], None),
    ])
}

/// Random source that replays a fixed list of values
///
/// Each call returns the next value modulo the requested bound, wrapping
/// around at the end of the list. An empty list always yields 0.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<u32>,
    next: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, next: 0 }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, upper: u32) -> Result<u32> {
        if self.values.is_empty() || upper == 0 {
            self.next += 1;
            return Ok(0);
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        Ok(value % upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framed_chunk_crc() {
        let iend = framed_chunk(b"IEND", &[], None);
        assert_eq!(iend, [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);

        let bad = framed_chunk(b"IEND", &[], Some(1));
        assert_eq!(&bad[8..], &[0, 0, 0, 1]);
    }

    #[test]
    fn test_minimal_png_layout() {
        let png = minimal_indexed_png();
        assert_eq!(png.len(), 89);
        assert_eq!(&png[..8], PNG_SIGNATURE);
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(&png[16..29], &INDEXED_IHDR);
        assert_eq!(&png[37..41], b"PLTE");
        assert_eq!(&png[41..47], &TWO_ENTRY_PALETTE);
        assert_eq!(&png[55..59], b"IDAT");
        assert_eq!(&png[81..85], b"IEND");
    }

    #[test]
    fn test_scripted_random_wraps() {
        let mut rng = ScriptedRandom::new(vec![5, 10]);
        assert_eq!(rng.uniform(7).unwrap(), 5);
        assert_eq!(rng.uniform(7).unwrap(), 3);
        assert_eq!(rng.uniform(100).unwrap(), 5);
        assert_eq!(rng.draws(), 3);

        let mut empty = ScriptedRandom::new(Vec::new());
        assert_eq!(empty.uniform(9).unwrap(), 0);
    }
}

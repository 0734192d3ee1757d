//! PNG chunk CRC-32
//!
//! PNG uses the standard CRC-32 (reflected polynomial `0xEDB88320`) computed
//! over the chunk type followed by the chunk data. The length field is not
//! covered.

use crate::chunk_type::ChunkType;

/// Calculate the CRC of a chunk from its type and data
pub fn crc32(chunk_type: &ChunkType, data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type.as_bytes());
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc_known_values() {
        // IEND is always empty, so its CRC is a well known constant
        assert_eq!(crc32(&ChunkType::IEND, &[]), 0xAE42_6082);
        assert_eq!(crc32(&ChunkType::IHDR, &[]), 0xA8A1_AE0A);

        // IHDR of a 1x1 8-bit RGB image
        let data = [
            0x00, 0x00, 0x00, 0x01, // Width: 1
            0x00, 0x00, 0x00, 0x01, // Height: 1
            0x08, // Bit depth: 8
            0x02, // Color type: RGB
            0x00, // Compression: deflate
            0x00, // Filter: adaptive
            0x00, // Interlace: none
        ];
        assert_eq!(crc32(&ChunkType::IHDR, &data), 0x9077_53DE);
    }

    #[test]
    fn test_crc_depends_on_type_and_data() {
        let data = b"some payload";
        let crc = crc32(&ChunkType::IDAT, data);
        assert_eq!(crc, crc32(&ChunkType::IDAT, data));
        assert_ne!(crc, crc32(&ChunkType::PLTE, data));
        assert_ne!(crc, crc32(&ChunkType::IDAT, b"some payloaD"));
    }
}

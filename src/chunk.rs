//! Chunk records

use crate::{
    chunk_type::ChunkType,
    crc::crc32,
    error::{Error, Result},
};

/// Largest chunk length allowed by PNG (2^31 - 1)
pub const MAX_CHUNK_LENGTH: u32 = 0x7FFF_FFFF;

/// Size of the length, type and CRC fields that frame every chunk
pub const CHUNK_OVERHEAD: u64 = 12;

/// A single PNG chunk: type, payload and the CRC that came with it
///
/// The chunk owns its payload. The stored CRC is whatever was read from the
/// stream (or supplied by the caller) and is not checked on construction; a
/// chunk whose data has been mutated must be re-signed with [`Chunk::resign`]
/// before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    chunk_type: ChunkType,
    data: Vec<u8>,
    crc: u32,
}

impl Chunk {
    /// Create a chunk and compute its CRC
    pub fn new(chunk_type: ChunkType, data: Vec<u8>) -> Result<Self> {
        let crc = crc32(&chunk_type, &data);
        Self::from_parts(chunk_type, data, crc)
    }

    /// Create a chunk with an explicit CRC, correct or not
    pub fn from_parts(chunk_type: ChunkType, data: Vec<u8>, crc: u32) -> Result<Self> {
        if data.len() > MAX_CHUNK_LENGTH as usize {
            return Err(Error::LengthOverflow {
                length: u32::try_from(data.len()).unwrap_or(u32::MAX),
            });
        }
        Ok(Self {
            chunk_type,
            data,
            crc,
        })
    }

    pub fn chunk_type(&self) -> ChunkType {
        self.chunk_type
    }

    /// Length of the payload, as written in the length field
    pub fn length(&self) -> u32 {
        // Bounded by MAX_CHUNK_LENGTH at construction
        self.data.len() as u32
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the payload
    ///
    /// The length cannot change through a slice, so the framing stays valid.
    /// The stored CRC does not follow the edit.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the chunk and return its payload
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// CRC stored with this chunk
    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// CRC computed from the current type and data
    pub fn computed_crc(&self) -> u32 {
        crc32(&self.chunk_type, &self.data)
    }

    /// Whether the stored CRC matches the current type and data
    pub fn crc_is_valid(&self) -> bool {
        self.crc == self.computed_crc()
    }

    /// Replace the stored CRC with one computed from the current data
    pub fn resign(&mut self) {
        self.crc = self.computed_crc();
    }

    /// Whether this is the `IEND` chunk that terminates a stream
    pub fn is_end(&self) -> bool {
        self.chunk_type == ChunkType::IEND
    }

    /// Number of bytes this chunk takes on the wire
    pub fn framed_len(&self) -> u64 {
        CHUNK_OVERHEAD + self.data.len() as u64
    }
}

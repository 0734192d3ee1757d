//! Chunk writer

use crate::{
    chunk::{Chunk, MAX_CHUNK_LENGTH},
    chunk_type::ChunkType,
    error::{Error, Result},
};
use byteorder::{BigEndian, WriteBytesExt};
use log::trace;
use std::io::Write;

/// Write one chunk as `length | type | data | crc`
///
/// The CRC is written as given. Callers that changed `data` must pass a CRC
/// computed with [`crc32`](crate::crc32). Nothing is rolled back if the writer
/// fails part way through.
pub fn write_chunk<W: Write>(
    writer: &mut W,
    chunk_type: &ChunkType,
    data: &[u8],
    crc: u32,
) -> Result<()> {
    if data.len() > MAX_CHUNK_LENGTH as usize {
        return Err(Error::LengthOverflow {
            length: u32::try_from(data.len()).unwrap_or(u32::MAX),
        });
    }
    let length = data.len() as u32;

    writer
        .write_u32::<BigEndian>(length)
        .map_err(Error::WriteFailure)?;
    writer
        .write_all(chunk_type.as_bytes())
        .map_err(Error::WriteFailure)?;
    writer.write_all(data).map_err(Error::WriteFailure)?;
    writer
        .write_u32::<BigEndian>(crc)
        .map_err(Error::WriteFailure)?;

    trace!("Wrote {} chunk: {} bytes, crc {:08X}", chunk_type, length, crc);
    Ok(())
}

/// Write a chunk record with the CRC it carries
pub fn write_chunk_record<W: Write>(writer: &mut W, chunk: &Chunk) -> Result<()> {
    write_chunk(writer, &chunk.chunk_type(), chunk.data(), chunk.crc())
}

//! Chunk reader
//!
//! Reads one length-prefixed, CRC-suffixed chunk at a time from a forward-only
//! stream. Framing is validated strictly; the CRC is returned as read and never
//! checked here.

use crate::{
    chunk::{Chunk, MAX_CHUNK_LENGTH},
    chunk_type::ChunkType,
    error::{Error, Result},
};
use byteorder::{BigEndian, ReadBytesExt};
use log::{trace, warn};
use std::io::{self, ErrorKind, Read};

/// Map a short read to `short`, anything else to an I/O error
fn short_read(e: io::Error, short: Error) -> Error {
    if e.kind() == ErrorKind::UnexpectedEof {
        short
    } else {
        Error::Io(e)
    }
}

/// Read the next chunk from a stream positioned on a chunk boundary
///
/// The fields are read in wire order and each must be complete before the
/// next is attempted:
///
/// 1. length, rejected above 2^31 - 1 before anything is allocated
/// 2. type, which must be four ASCII letters
/// 3. data, exactly `length` bytes
/// 4. CRC, stored as-is
pub fn read_chunk<R: Read>(source: &mut R) -> Result<Chunk> {
    let length = source
        .read_u32::<BigEndian>()
        .map_err(|e| short_read(e, Error::TruncatedHeader))?;
    if length > MAX_CHUNK_LENGTH {
        return Err(Error::LengthOverflow { length });
    }

    let mut type_bytes = [0u8; 4];
    source
        .read_exact(&mut type_bytes)
        .map_err(|e| short_read(e, Error::TruncatedHeader))?;
    let chunk_type = ChunkType::new(type_bytes)?;

    let mut data = Vec::new();
    if length > 0 {
        data.try_reserve_exact(length as usize)
            .map_err(|_| Error::AllocationFailure { length })?;
        let read = source.by_ref().take(length as u64).read_to_end(&mut data)?;
        if read != length as usize {
            return Err(Error::TruncatedData {
                expected: length,
                actual: read,
            });
        }
    }

    let crc = source
        .read_u32::<BigEndian>()
        .map_err(|e| short_read(e, Error::TruncatedCrc))?;

    trace!("Read {} chunk: {} bytes, crc {:08X}", chunk_type, length, crc);
    Chunk::from_parts(chunk_type, data, crc)
}

/// Iterator over the chunks of a stream
///
/// The stream must already be positioned past the signature. Iteration ends
/// after `IEND` is yielded, or after the first error.
///
/// ```
/// use png_chunk_io::{ChunkReader, ChunkType};
/// use std::io::Cursor;
///
/// let iend = [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82];
/// let mut chunks = ChunkReader::new(Cursor::new(iend));
/// let chunk = chunks.next().unwrap().unwrap();
/// assert_eq!(chunk.chunk_type(), ChunkType::IEND);
/// assert!(chunks.next().is_none());
/// ```
pub struct ChunkReader<R> {
    source: R,
    finished: bool,
    warn_on_bad_crc: bool,
}

impl<R: Read> ChunkReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            finished: false,
            warn_on_bad_crc: false,
        }
    }

    /// Log a warning for every chunk whose CRC does not match
    ///
    /// Mismatches are still not errors.
    pub fn warn_on_bad_crc(mut self, warn: bool) -> Self {
        self.warn_on_bad_crc = warn;
        self
    }

    /// Whether `IEND` or an error has been reached
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume the reader and return the underlying stream
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match read_chunk(&mut self.source) {
            Ok(chunk) => {
                if self.warn_on_bad_crc && !chunk.crc_is_valid() {
                    warn!(
                        "{} chunk has CRC {:08X}, expected {:08X}",
                        chunk.chunk_type(),
                        chunk.crc(),
                        chunk.computed_crc()
                    );
                }
                self.finished = chunk.is_end();
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn framed(length: u32, chunk_type: &[u8], data: &[u8], crc: u32) -> Vec<u8> {
        let mut out = length.to_be_bytes().to_vec();
        out.extend_from_slice(chunk_type);
        out.extend_from_slice(data);
        out.extend_from_slice(&crc.to_be_bytes());
        out
    }

    #[test]
    fn test_read_chunk() {
        let bytes = framed(3, b"tEXt", b"a\0b", 0x1234_5678);
        let mut source = Cursor::new(bytes);

        let chunk = read_chunk(&mut source).unwrap();
        assert_eq!(chunk.chunk_type().as_bytes(), b"tEXt");
        assert_eq!(chunk.data(), b"a\0b");
        assert_eq!(chunk.crc(), 0x1234_5678);
        assert_eq!(source.position(), 15);
    }

    #[test]
    fn test_read_empty_chunk() {
        let mut source = Cursor::new(framed(0, b"IEND", &[], 0xAE42_6082));
        let chunk = read_chunk(&mut source).unwrap();
        assert!(chunk.is_end());
        assert!(chunk.data().is_empty());
        assert!(chunk.crc_is_valid());
    }

    #[test]
    fn test_length_overflow_before_allocation() {
        // No data follows: the length alone must be enough to reject
        let mut source = Cursor::new(vec![0x80, 0x00, 0x00, 0x00]);
        assert!(matches!(
            read_chunk(&mut source),
            Err(Error::LengthOverflow { length: 0x8000_0000 })
        ));

        let mut source = Cursor::new(vec![0xFF; 4]);
        assert!(matches!(
            read_chunk(&mut source),
            Err(Error::LengthOverflow { length: u32::MAX })
        ));
    }

    #[test]
    fn test_max_length_is_not_overflow() {
        // Length 2^31 - 1 passes the length check and fails later on data
        let mut bytes = vec![0x7F, 0xFF, 0xFF, 0xFF];
        bytes.extend_from_slice(b"IDAT");
        bytes.extend_from_slice(&[0; 16]);

        let result = read_chunk(&mut Cursor::new(bytes));
        assert!(matches!(
            result,
            Err(Error::TruncatedData { expected: 0x7FFF_FFFF, actual: 16 })
                | Err(Error::AllocationFailure { .. })
        ));
    }

    #[test]
    fn test_invalid_type() {
        for bad in [b"IHD1", b"ID T", b"I_AT"] {
            let mut source = Cursor::new(framed(0, bad, &[], 0));
            assert!(matches!(
                read_chunk(&mut source),
                Err(Error::InvalidType { .. })
            ));
        }
    }

    #[test]
    fn test_truncated_fields() {
        let full = framed(4, b"IDAT", &[1, 2, 3, 4], 0xCAFE_F00D);

        let cases: [(usize, fn(&Error) -> bool); 6] = [
            (0, |e| matches!(e, Error::TruncatedHeader)),
            (3, |e| matches!(e, Error::TruncatedHeader)),
            (6, |e| matches!(e, Error::TruncatedHeader)),
            (10, |e| matches!(e, Error::TruncatedData { expected: 4, actual: 2 })),
            (12, |e| matches!(e, Error::TruncatedCrc)),
            (15, |e| matches!(e, Error::TruncatedCrc)),
        ];

        for (len, expected) in cases {
            let mut source = Cursor::new(full[..len].to_vec());
            let err = read_chunk(&mut source).unwrap_err();
            assert!(expected(&err), "cut at {}: unexpected {:?}", len, err);
        }
    }

    /// Yields `good` bytes, then fails with a non-EOF error
    struct FailingReader {
        good: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.good.read(buf)? {
                0 => Err(io::Error::new(ErrorKind::Other, "device error")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_error_is_io_error() {
        let full = framed(4, b"IDAT", &[1, 2, 3, 4], 0xCAFE_F00D);

        // Inside the length, the type, the data and the CRC
        for cut in [2, 6, 10, 14] {
            let mut source = FailingReader {
                good: Cursor::new(full[..cut].to_vec()),
            };
            let err = read_chunk(&mut source).unwrap_err();
            assert!(
                matches!(&err, Error::Io(e) if e.kind() == ErrorKind::Other),
                "cut at {}: unexpected {:?}",
                cut,
                err
            );
        }
    }

    #[test]
    fn test_bad_crc_is_not_an_error() {
        let mut source = Cursor::new(framed(2, b"IDAT", &[9, 9], 0));
        let chunk = read_chunk(&mut source).unwrap();
        assert_eq!(chunk.crc(), 0);
        assert!(!chunk.crc_is_valid());
    }

    #[test]
    fn test_iterator_stops_after_iend() {
        let mut bytes = framed(1, b"IDAT", &[7], 0);
        bytes.extend(framed(0, b"IEND", &[], 0xAE42_6082));
        bytes.extend(framed(0, b"tEXt", &[], 0)); // trailing chunk is never read

        let chunks: Vec<_> = ChunkReader::new(Cursor::new(bytes))
            .warn_on_bad_crc(true)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chunk_type(), ChunkType::IDAT);
        assert!(chunks[1].is_end());
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut bytes = framed(1, b"IDAT", &[7], 0);
        bytes.extend_from_slice(&[0, 0]);

        let mut reader = ChunkReader::new(Cursor::new(bytes));
        assert!(reader.next().unwrap().is_ok());
        assert!(matches!(reader.next(), Some(Err(Error::TruncatedHeader))));
        assert!(reader.is_finished());
        assert!(reader.next().is_none());
    }
}

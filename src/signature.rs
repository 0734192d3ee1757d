//! PNG signature detection

use crate::error::{Error, Result};
use log::debug;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

/// The eight bytes every PNG stream starts with
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Where to look for the signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureSearch {
    /// The signature must be at the current position
    #[default]
    AtStart,
    /// Search forward from the current position for the first signature
    Scan,
}

/// Read eight bytes and check whether they are the PNG signature
///
/// The bytes are consumed whatever the outcome. A stream with fewer than
/// eight bytes left is not a PNG stream.
pub fn is_png_stream<R: Read>(source: &mut R) -> Result<bool> {
    let mut sig = [0u8; 8];
    match source.read_exact(&mut sig) {
        Ok(()) => Ok(&sig == PNG_SIGNATURE),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Bytes read per step of [`scan_for_signature`]
const SCAN_BLOCK_SIZE: usize = 8192;

/// Find the PNG signature at or after the current position
///
/// The stream is read forward in blocks and searched with an eight-byte
/// window that carries over block boundaries, so a signature embedded after
/// arbitrary leading bytes is found without seeking per candidate offset.
/// Returns the offset where the signature starts; the stream is left just
/// past it. Running out of input, or any seek or read error, means there is
/// no signature.
pub fn scan_for_signature<R: Read + Seek>(source: &mut R) -> Result<u64> {
    let sig_len = PNG_SIGNATURE.len();

    // `window[0]` sits at stream offset `base`
    let mut base = source
        .stream_position()
        .map_err(|_| Error::SignatureNotFound)?;
    let mut window = Vec::with_capacity(SCAN_BLOCK_SIZE + sig_len);
    let mut block = vec![0u8; SCAN_BLOCK_SIZE];

    loop {
        let read = match source.read(&mut block) {
            Ok(0) => {
                debug!("Signature scan reached end of stream");
                return Err(Error::SignatureNotFound);
            }
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!("Signature scan stopped near offset {}: {}", base, e);
                return Err(Error::SignatureNotFound);
            }
        };
        window.extend_from_slice(&block[..read]);

        if let Some(pos) = window
            .windows(sig_len)
            .position(|candidate| candidate == PNG_SIGNATURE)
        {
            let offset = base + pos as u64;
            source
                .seek(SeekFrom::Start(offset + sig_len as u64))
                .map_err(|_| Error::SignatureNotFound)?;
            debug!("PNG signature found at offset {}", offset);
            return Ok(offset);
        }

        // Keep the tail that could still start a signature
        let consumed = window.len().saturating_sub(sig_len - 1);
        window.drain(..consumed);
        base += consumed as u64;
    }
}

/// Position the stream just past the PNG signature
///
/// Returns the offset at which the signature starts.
pub fn locate_signature<R: Read + Seek>(source: &mut R, search: SignatureSearch) -> Result<u64> {
    match search {
        SignatureSearch::AtStart => {
            let offset = source.stream_position()?;
            if is_png_stream(source)? {
                Ok(offset)
            } else {
                Err(Error::SignatureNotFound)
            }
        }
        SignatureSearch::Scan => scan_for_signature(source),
    }
}

/// Write the PNG signature
pub fn write_signature<W: Write>(writer: &mut W) -> Result<()> {
    writer.write_all(PNG_SIGNATURE).map_err(Error::WriteFailure)
}

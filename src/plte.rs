//! PLTE chunk payload: an ordered list of RGB entries
//!
//! The palette is a view over the chunk's own buffer, so editing entries
//! edits the payload directly. After any edit the owning chunk needs a new
//! CRC (see [`Chunk::resign`](crate::Chunk::resign)).

use crate::error::{Error, Result};

/// Size of one palette entry in bytes
pub const ENTRY_SIZE: usize = 3;

/// One palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Mutable palette view over a PLTE payload
#[derive(Debug)]
pub struct Palette<'a> {
    bytes: &'a mut [u8],
}

impl<'a> Palette<'a> {
    /// Interpret a PLTE payload as a palette
    ///
    /// Fails with [`Error::InvalidPaletteLength`] unless the length is a
    /// multiple of 3.
    pub fn from_payload(bytes: &'a mut [u8]) -> Result<Self> {
        if bytes.len() % ENTRY_SIZE != 0 {
            return Err(Error::InvalidPaletteLength {
                length: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.bytes.len() / ENTRY_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.bytes
            .chunks_exact(ENTRY_SIZE)
            .nth(index)
            .map(|entry| Rgb::new(entry[0], entry[1], entry[2]))
    }

    /// Overwrite an entry; returns `false` if `index` is out of range
    pub fn set(&mut self, index: usize, color: Rgb) -> bool {
        match self.bytes.chunks_exact_mut(ENTRY_SIZE).nth(index) {
            Some(entry) => {
                entry.copy_from_slice(&[color.r, color.g, color.b]);
                true
            }
            None => false,
        }
    }

    /// Exchange two entries
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.bytes.split_at_mut(high * ENTRY_SIZE);
        head[low * ENTRY_SIZE..(low + 1) * ENTRY_SIZE].swap_with_slice(&mut tail[..ENTRY_SIZE]);
    }

    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.bytes
            .chunks_exact(ENTRY_SIZE)
            .map(|entry| Rgb::new(entry[0], entry[1], entry[2]))
    }

    /// The underlying payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }
}

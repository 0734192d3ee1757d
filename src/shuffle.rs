//! Palette shuffling
//!
//! A bounded scramble of PLTE entries: `length / 2` swap attempts, each
//! between two randomly drawn positions. This is not a uniform permutation;
//! draws can collide and entries can move more than once. What it guarantees
//! is that the set of colors (with multiplicity) and the entry count are
//! unchanged.

use crate::{
    chunk::Chunk,
    error::Result,
    plte::{Palette, ENTRY_SIZE},
};
use log::debug;

/// Source of uniformly distributed integers
pub trait RandomSource {
    /// Return a value uniformly distributed in `0..upper`
    ///
    /// `upper` is never 0 when called from this crate.
    fn uniform(&mut self, upper: u32) -> Result<u32>;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn uniform(&mut self, upper: u32) -> Result<u32> {
        (**self).uniform(upper)
    }
}

/// Random source backed by the operating system
///
/// Bytes are fetched from `getrandom` in blocks; bounded values use rejection
/// sampling so every value in `0..upper` is equally likely.
pub struct OsRandom {
    buf: [u8; 256],
    pos: usize,
}

impl OsRandom {
    pub fn new() -> Self {
        Self {
            buf: [0; 256],
            pos: 256,
        }
    }

    fn next_u32(&mut self) -> Result<u32> {
        if self.pos + 4 > self.buf.len() {
            getrandom::getrandom(&mut self.buf)?;
            self.pos = 0;
        }
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.buf[self.pos..self.pos + 4]);
        self.pos += 4;
        Ok(u32::from_le_bytes(word))
    }
}

impl Default for OsRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for OsRandom {
    fn uniform(&mut self, upper: u32) -> Result<u32> {
        if upper < 2 {
            return Ok(0);
        }
        // Values below 2^32 % upper would make the low results more likely
        let min = upper.wrapping_neg() % upper;
        loop {
            let value = self.next_u32()?;
            if value >= min {
                return Ok(value % upper);
            }
        }
    }
}

/// Scramble palette entries in place
///
/// For a payload of `length` bytes, `length / 2` attempts are made. Each draws
/// two byte offsets in `0..length - 3` and swaps the entries those offsets fall
/// in, unless they are the same entry. Because the draw range stops three
/// bytes short of the end, the last entry never moves.
///
/// Returns the number of swaps performed.
pub fn shuffle_palette<R: RandomSource>(palette: &mut Palette<'_>, rng: &mut R) -> Result<usize> {
    let length = palette.as_bytes().len();
    if length < 2 * ENTRY_SIZE {
        return Ok(0);
    }

    // Bounded by MAX_CHUNK_LENGTH, so it fits in u32
    let upper = (length - ENTRY_SIZE) as u32;
    let attempts = length / 2;
    let mut swaps = 0;

    for _ in 0..attempts {
        let src = rng.uniform(upper)? as usize / ENTRY_SIZE;
        let dest = rng.uniform(upper)? as usize / ENTRY_SIZE;
        if src == dest {
            continue;
        }
        palette.swap(src, dest);
        swaps += 1;
    }

    debug!(
        "Shuffled {} palette entries: {} swaps in {} attempts",
        palette.len(),
        swaps,
        attempts
    );
    Ok(swaps)
}

/// Shuffle a PLTE chunk's payload and re-sign it
///
/// Fails with [`Error::InvalidPaletteLength`](crate::Error::InvalidPaletteLength)
/// if the payload is not a whole number of entries; the chunk is untouched in
/// that case.
pub fn shuffle_plte_chunk<R: RandomSource>(chunk: &mut Chunk, rng: &mut R) -> Result<usize> {
    let swaps = {
        let mut palette = Palette::from_payload(chunk.data_mut())?;
        shuffle_palette(&mut palette, rng)?
    };
    chunk.resign();
    Ok(swaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chunk_type::ChunkType, test_utils::ScriptedRandom, Error};

    fn sorted(bytes: &[u8]) -> Vec<[u8; 3]> {
        let mut entries: Vec<[u8; 3]> = bytes
            .chunks_exact(3)
            .map(|entry| [entry[0], entry[1], entry[2]])
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn test_os_random_in_range() {
        let mut rng = OsRandom::new();
        for upper in [1, 2, 3, 7, 765, u32::MAX] {
            for _ in 0..100 {
                assert!(rng.uniform(upper).unwrap() < upper);
            }
        }
        assert_eq!(rng.uniform(0).unwrap(), 0);
    }

    #[test]
    fn test_scripted_swaps() {
        // 4 entries, 12 bytes: 6 attempts drawing offsets in 0..9
        let mut payload: Vec<u8> = (0..12).collect();
        let mut rng = ScriptedRandom::new(vec![0, 3, 5, 5, 6, 8, 0, 2, 8, 0, 1, 7]);

        let mut palette = Palette::from_payload(&mut payload).unwrap();
        let swaps = shuffle_palette(&mut palette, &mut rng).unwrap();

        // (0,1) swap, (1,1) skip, (2,2) skip, (0,0) skip, (2,0) swap, (0,2) swap
        assert_eq!(swaps, 3);
        assert_eq!(payload, vec![3, 4, 5, 0, 1, 2, 6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_preserves_entries() {
        let mut payload: Vec<u8> = (0..=255u8).cycle().take(256 * 3).collect();
        let before = sorted(&payload);

        let mut palette = Palette::from_payload(&mut payload).unwrap();
        shuffle_palette(&mut palette, &mut OsRandom::new()).unwrap();
        assert_eq!(palette.len(), 256);

        assert_eq!(sorted(&payload), before);
        // The last entry is outside the draw range
        assert_eq!(&payload[765..], &[253, 254, 255]);
    }

    #[test]
    fn test_small_palettes_untouched() {
        for len in [0, 3] {
            let mut payload = vec![9u8; len];
            let mut palette = Palette::from_payload(&mut payload).unwrap();
            let swaps = shuffle_palette(&mut palette, &mut ScriptedRandom::new(vec![0])).unwrap();
            assert_eq!(swaps, 0);
        }
    }

    #[test]
    fn test_chunk_is_resigned() {
        let data = vec![1, 1, 1, 2, 2, 2, 3, 3, 3];
        let mut chunk = Chunk::new(ChunkType::PLTE, data).unwrap();
        let mut rng = ScriptedRandom::new(vec![0, 3]);

        let swaps = shuffle_plte_chunk(&mut chunk, &mut rng).unwrap();
        assert!(swaps > 0);
        assert_eq!(chunk.length(), 9);
        assert!(chunk.crc_is_valid());
        assert_eq!(sorted(chunk.data()), vec![[1, 1, 1], [2, 2, 2], [3, 3, 3]]);
    }

    #[test]
    fn test_bad_palette_chunk() {
        let mut chunk = Chunk::from_parts(ChunkType::PLTE, vec![0; 4], 0x1111_1111).unwrap();
        let result = shuffle_plte_chunk(&mut chunk, &mut OsRandom::new());

        assert!(matches!(result, Err(Error::InvalidPaletteLength { length: 4 })));
        assert_eq!(chunk.crc(), 0x1111_1111);
    }
}

//! Backing Memory.
//!
//! This module implements the word-addressed store that sits behind the cache.
//! It provides:
//! 1. **Storage:** A fixed-size array of [`Word`]s indexed by absolute address.
//! 2. **Initialization:** Random contents (0..=99) from a seedable generator.
//! 3. **Bounds:** Every single-word access is checked; nothing wraps or clamps.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::common::{Result, SimError, Word};

/// Exclusive upper bound of randomly initialized word values.
const RANDOM_WORD_LIMIT: u64 = 100;

/// Fixed-size, word-addressed backing store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackingMemory {
    words: Vec<Word>,
}

impl BackingMemory {
    /// Creates a memory of `size` words with random contents seeded from OS entropy.
    pub fn new(size: usize) -> Self {
        Self::fill_random(size, &mut ChaCha8Rng::from_os_rng())
    }

    /// Creates a memory of `size` words with contents derived from `seed`.
    ///
    /// Two memories built from the same size and seed are identical.
    pub fn with_seed(size: usize, seed: u64) -> Self {
        Self::fill_random(size, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a memory holding exactly `words`.
    pub fn from_words(words: impl IntoIterator<Item = impl Into<Word>>) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    fn fill_random(size: usize, rng: &mut impl Rng) -> Self {
        let words = (0..size)
            .map(|_| Word::from(rng.random_range(0..RANDOM_WORD_LIMIT)))
            .collect();
        Self { words }
    }

    /// Returns the number of addressable words.
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// Reads the word at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`] if `address >= self.size()`.
    pub fn read(&self, address: usize) -> Result<&Word> {
        self.words.get(address).ok_or(SimError::OutOfRange {
            address,
            size: self.words.len(),
        })
    }

    /// Replaces the word at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`] if `address >= self.size()`.
    pub fn write(&mut self, address: usize, value: Word) -> Result<()> {
        let size = self.words.len();
        let slot = self
            .words
            .get_mut(address)
            .ok_or(SimError::OutOfRange { address, size })?;
        *slot = value;
        Ok(())
    }

    /// Reads `len` words starting at `base`.
    ///
    /// Positions at or past the end of memory yield [`Word::EMPTY`]; a block
    /// fill never fails.
    pub fn read_block(&self, base: usize, len: usize) -> Vec<Word> {
        (base..base.saturating_add(len))
            .map(|addr| self.words.get(addr).cloned().unwrap_or(Word::EMPTY))
            .collect()
    }

    /// Snapshot view of `(address, value)` pairs in address order.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = (usize, &Word)> + '_ {
        self.words.iter().enumerate()
    }
}

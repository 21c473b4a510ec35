//! Organization-agnostic cache interface.
//!
//! Front-ends drive a cache through [`CacheModel`] without knowing whether it
//! is direct-mapped, set-associative or fully-associative.

use std::fmt;

use super::{AccessOutcome, CacheLine, CacheSim};
use crate::common::{Result, Word};
use crate::stats::CacheStats;

/// Operations every cache organization supports.
pub trait CacheModel: fmt::Debug {
    /// Reads `address` through the cache.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`](crate::common::SimError::OutOfRange)
    /// for addresses outside backing memory.
    fn read(&mut self, address: usize) -> Result<AccessOutcome>;

    /// Writes `value` to `address` through the cache.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`](crate::common::SimError::OutOfRange)
    /// for addresses outside backing memory.
    fn write(&mut self, address: usize, value: Word) -> Result<AccessOutcome>;

    /// Read-only view of every line, in slot order.
    fn lines(&self) -> &[CacheLine];

    /// Aggregate counters.
    fn stats(&self) -> &CacheStats;

    /// Words per block.
    fn block_size(&self) -> usize;

    /// Number of hits so far.
    fn hits(&self) -> u64 {
        self.stats().hits
    }

    /// Number of misses so far.
    fn misses(&self) -> u64 {
        self.stats().misses
    }
}

impl CacheModel for CacheSim {
    fn read(&mut self, address: usize) -> Result<AccessOutcome> {
        Self::read(self, address)
    }

    fn write(&mut self, address: usize, value: Word) -> Result<AccessOutcome> {
        Self::write(self, address, value)
    }

    fn lines(&self) -> &[CacheLine] {
        Self::lines(self)
    }

    fn stats(&self) -> &CacheStats {
        Self::stats(self)
    }

    fn block_size(&self) -> usize {
        Self::block_size(self)
    }
}

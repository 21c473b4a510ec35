//! Cache geometry and address decomposition.
//!
//! Every organization is described by three numbers: total lines, words per
//! block and lines per set. Direct-mapped is `ways == 1`; fully-associative is
//! `ways == lines`. The same decomposition serves read and write paths, and its
//! inverse reconstructs the base address of a resident block from its tag and set.

use std::ops::Range;

use crate::common::{AccessDetails, ConfigError};

/// Validated cache shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    lines: usize,
    block_size: usize,
    ways: usize,
    num_sets: usize,
}

impl CacheGeometry {
    /// Validates and builds a geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any dimension is zero or `ways` does not
    /// evenly divide `lines`.
    pub const fn new(lines: usize, block_size: usize, ways: usize) -> Result<Self, ConfigError> {
        if lines == 0 {
            return Err(ConfigError::ZeroLines);
        }
        if block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if lines % ways != 0 {
            return Err(ConfigError::UnevenSets { lines, ways });
        }
        Ok(Self {
            lines,
            block_size,
            ways,
            num_sets: lines / ways,
        })
    }

    /// Total number of lines.
    pub const fn lines(&self) -> usize {
        self.lines
    }

    /// Words per block.
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Lines per set.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of sets (`lines / ways`).
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Splits `address` into block, set, tag and offset.
    pub const fn decompose(&self, address: usize) -> AccessDetails {
        let block = address / self.block_size;
        AccessDetails {
            address,
            block,
            set: block % self.num_sets,
            tag: block / self.num_sets,
            offset: address % self.block_size,
        }
    }

    /// Line indices that may hold blocks of `set`.
    pub const fn candidates(&self, set: usize) -> Range<usize> {
        let start = set * self.ways;
        start..start + self.ways
    }

    /// Set that owns line `line`.
    pub const fn set_of_line(&self, line: usize) -> usize {
        line / self.ways
    }

    /// Reconstructs the block number held under `tag` in `set`.
    pub const fn block_number(&self, tag: usize, set: usize) -> usize {
        tag * self.num_sets + set
    }

    /// First word address of block `block`.
    pub const fn block_base(&self, block: usize) -> usize {
        block * self.block_size
    }
}

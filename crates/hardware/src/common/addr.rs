//! Decomposed cache addresses.
//!
//! A word address seen by the cache splits into a block number and an offset
//! within that block; the block number splits again into a set index and a tag.
//! [`AccessDetails`] carries all four so a caller can render exactly where an
//! access landed.

use std::fmt;

/// Where a single address lands in the cache geometry.
///
/// Produced by [`CacheGeometry::decompose`](crate::cache::CacheGeometry::decompose)
/// and published with every access outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccessDetails {
    /// The word address that was accessed.
    pub address: usize,
    /// `address / block_size`.
    pub block: usize,
    /// `block % num_sets`; for direct-mapped caches this is the line index.
    pub set: usize,
    /// `block / num_sets`.
    pub tag: usize,
    /// `address % block_size`.
    pub offset: usize,
}

impl fmt::Display for AccessDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Block: {} | Set: {} | Tag: {}]",
            self.block, self.set, self.tag
        )
    }
}

//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has gone longest without being used. Every
//! hit and every fill moves the line's stamp to the current clock value, so the
//! smallest stamp in a set marks the least recently used line.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(1)
//!   - `victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(L) where L is the number of lines
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Cyclic scans one block larger than the set (thrashing)

use std::ops::Range;

use super::{ReplacementPolicy, Stamps, Touch};

/// LRU Policy state.
#[derive(Clone, Debug)]
pub struct LruPolicy {
    stamps: Stamps,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `lines` - Total number of lines in the cache.
    pub fn new(lines: usize) -> Self {
        Self {
            stamps: Stamps::new(lines),
        }
    }

    /// Clock value of the last hit or fill of `line` (0 if never touched).
    pub fn last_use(&self, line: usize) -> u64 {
        self.stamps.get(line)
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Hits and fills both count as a use.
    fn touch(&mut self, line: usize, _event: Touch) {
        self.stamps.stamp(line);
    }

    fn victim(&mut self, candidates: Range<usize>) -> usize {
        self.stamps.oldest(candidates)
    }

    fn reset(&mut self) {
        self.stamps.clear();
    }
}

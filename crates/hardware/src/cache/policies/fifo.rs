//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the line whose block arrived first, regardless of how
//! recently it was accessed. Only fills advance a line's stamp; hits leave it
//! untouched, so reuse never protects a line from eviction.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(1)
//!   - `victim()`: O(W) where W is the number of ways
//! - **Space Complexity:** O(L) where L is the number of lines
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use std::ops::Range;

use super::{ReplacementPolicy, Stamps, Touch};

/// FIFO Policy state.
#[derive(Clone, Debug)]
pub struct FifoPolicy {
    stamps: Stamps,
}

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    ///
    /// # Arguments
    ///
    /// * `lines` - Total number of lines in the cache.
    pub fn new(lines: usize) -> Self {
        Self {
            stamps: Stamps::new(lines),
        }
    }

    /// Clock value at which `line` was last filled (0 if never filled).
    pub fn inserted_at(&self, line: usize) -> u64 {
        self.stamps.get(line)
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn touch(&mut self, line: usize, event: Touch) {
        if event == Touch::Fill {
            self.stamps.stamp(line);
        }
    }

    fn victim(&mut self, candidates: Range<usize>) -> usize {
        self.stamps.oldest(candidates)
    }

    fn reset(&mut self) {
        self.stamps.clear();
    }
}

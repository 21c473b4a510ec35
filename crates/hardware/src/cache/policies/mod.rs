//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting a victim line when every candidate
//! line of a set is valid. Filling an invalid line never consults the policy;
//! the engine picks the lowest-indexed invalid candidate first.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used (stamped on hit and fill).
//! - `Fifo`: First-In, First-Out (stamped on fill only).
//! - `Random`: Uniform choice from a seedable generator.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

use std::fmt;
use std::ops::Range;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

/// Event that touched a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touch {
    /// The line satisfied a lookup.
    Hit,
    /// A block was installed into the line.
    Fill,
}

/// Trait for cache replacement policies.
///
/// Line indices are global (`0..lines`), not way numbers within a set.
pub trait ReplacementPolicy: Send + Sync + fmt::Debug {
    /// Records that `line` was touched by `event`.
    fn touch(&mut self, line: usize, event: Touch);

    /// Selects the line to evict among `candidates`.
    ///
    /// `candidates` is never empty and every line in it is valid.
    fn victim(&mut self, candidates: Range<usize>) -> usize;

    /// Forgets all recorded history.
    fn reset(&mut self);
}

/// Logical-clock stamps shared by the timestamp-ordered policies.
///
/// One clock per cache; each line remembers the clock value of its last
/// relevant touch. The oldest stamp is the victim, ties going to the lowest index.
#[derive(Clone, Debug, Default)]
pub(crate) struct Stamps {
    clock: u64,
    stamps: Vec<u64>,
}

impl Stamps {
    pub(crate) fn new(lines: usize) -> Self {
        Self {
            clock: 0,
            stamps: vec![0; lines],
        }
    }

    pub(crate) fn stamp(&mut self, line: usize) {
        self.clock += 1;
        self.stamps[line] = self.clock;
    }

    pub(crate) fn oldest(&self, candidates: Range<usize>) -> usize {
        let mut victim = candidates.start;
        for line in candidates {
            if self.stamps[line] < self.stamps[victim] {
                victim = line;
            }
        }
        victim
    }

    pub(crate) fn get(&self, line: usize) -> u64 {
        self.stamps[line]
    }

    pub(crate) fn clear(&mut self) {
        self.clock = 0;
        self.stamps.fill(0);
    }
}

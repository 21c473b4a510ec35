//! Cache statistics collection and reporting.
//!
//! This module tracks the aggregate counters of a single cache. It provides:
//! 1. **Accesses:** Hit and miss counts, split by reads and writes.
//! 2. **Miss classes:** Compulsory vs. conflict misses.
//! 3. **Traffic:** Valid blocks evicted and dirty blocks written back.

use crate::cache::{AccessKind, AccessOutcome};
use crate::common::AccessType;

/// Aggregate counters for one cache instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that had to fetch their block.
    pub misses: u64,
    /// Misses on a block's first-ever reference.
    pub compulsory_misses: u64,
    /// Misses on a block referenced before but no longer resident.
    pub conflict_misses: u64,
    /// Read operations issued.
    pub reads: u64,
    /// Write operations issued.
    pub writes: u64,
    /// Valid blocks displaced by fills.
    pub evictions: u64,
    /// Dirty blocks flushed to backing memory (eviction or explicit flush).
    pub writebacks: u64,
}

impl CacheStats {
    /// Folds one access outcome into the counters.
    pub fn record(&mut self, outcome: &AccessOutcome) {
        match outcome.access {
            AccessType::Read => self.reads += 1,
            AccessType::Write => self.writes += 1,
        }
        match outcome.kind {
            AccessKind::Hit => self.hits += 1,
            AccessKind::Compulsory => {
                self.misses += 1;
                self.compulsory_misses += 1;
            }
            AccessKind::Conflict => {
                self.misses += 1;
                self.conflict_misses += 1;
            }
        }
        if let Some(eviction) = outcome.eviction {
            self.evictions += 1;
            if eviction.written_back {
                self.writebacks += 1;
            }
        }
    }

    /// Total accesses.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, in `0.0..=1.0` (0 with no accesses).
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Prints the statistics report to stdout.
    ///
    /// # Panics
    ///
    /// This function will not panic. Division by zero is prevented by
    /// clamping the access count to at least one.
    pub fn print(&self) {
        let total = self.accesses().max(1) as f64;
        println!("\n==========================================================");
        println!("CACHE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("accesses                 {}", self.accesses());
        println!("  reads                  {}", self.reads);
        println!("  writes                 {}", self.writes);
        println!(
            "hits                     {} ({:.2}%)",
            self.hits,
            (self.hits as f64 / total) * 100.0
        );
        println!(
            "misses                   {} ({:.2}%)",
            self.misses,
            (self.misses as f64 / total) * 100.0
        );
        println!("  misses.compulsory      {}", self.compulsory_misses);
        println!("  misses.conflict        {}", self.conflict_misses);
        println!("----------------------------------------------------------");
        println!("evictions                {}", self.evictions);
        println!("writebacks               {}", self.writebacks);
        println!("==========================================================");
    }
}

//! Functional Cache Simulator.
//!
//! This module implements a single cache engine parameterized by
//! `(num_sets, ways)`. Direct-mapped caches are the `ways == 1` case and
//! fully-associative caches the `ways == lines` case; set-associative caches
//! sit in between. The engine models hit/miss detection, victim selection,
//! dirty-block write-back and compulsory/conflict miss classification over an
//! owned [`BackingMemory`].

/// Geometry validation and address decomposition.
pub mod geometry;

/// Cache line storage.
pub mod line;

/// Per-access results.
pub mod outcome;

/// Cache replacement policy implementations (FIFO, LRU, Random).
pub mod policies;

/// Organization-agnostic cache interface.
pub mod traits;

use std::collections::HashSet;
use std::ops::Range;

use tracing::{debug, trace};

pub use self::geometry::CacheGeometry;
pub use self::line::CacheLine;
pub use self::outcome::{AccessKind, AccessOutcome, Eviction};
use self::policies::{FifoPolicy, LruPolicy, RandomPolicy, ReplacementPolicy, Touch};
pub use self::traits::CacheModel;
use crate::common::{AccessDetails, AccessType, Result, SimError, Word};
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType, WritePolicy};
use crate::memory::BackingMemory;
use crate::stats::CacheStats;

/// Cache simulator over a backing memory.
///
/// Supports LRU, FIFO and Random replacement and write-through or write-back
/// writes. Every access returns an [`AccessOutcome`]; aggregate counters are
/// kept in [`CacheStats`].
#[derive(Debug)]
pub struct CacheSim {
    geometry: CacheGeometry,
    lines: Vec<CacheLine>,
    memory: BackingMemory,
    write_policy: WritePolicy,
    replacement: PolicyType,
    policy: Box<dyn ReplacementPolicy>,
    /// Every block number ever fetched; never pruned.
    seen_blocks: HashSet<usize>,
    stats: CacheStats,
}

impl CacheSim {
    /// Creates a cache with an already validated geometry.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Line count, block size and associativity.
    /// * `memory` - Backing memory the cache fills from and writes to.
    /// * `replacement` - Victim selection policy for full sets.
    /// * `write_policy` - Write-through or write-back.
    /// * `seed` - Seed for random replacement; `None` uses OS entropy.
    pub fn new(
        geometry: CacheGeometry,
        memory: BackingMemory,
        replacement: PolicyType,
        write_policy: WritePolicy,
        seed: Option<u64>,
    ) -> Self {
        let policy: Box<dyn ReplacementPolicy> = match replacement {
            PolicyType::Lru => Box::new(LruPolicy::new(geometry.lines())),
            PolicyType::Fifo => Box::new(FifoPolicy::new(geometry.lines())),
            PolicyType::Random => Box::new(RandomPolicy::new(seed)),
        };

        debug!(
            lines = geometry.lines(),
            block_size = geometry.block_size(),
            ways = geometry.ways(),
            sets = geometry.num_sets(),
            ?replacement,
            ?write_policy,
            memory_size = memory.size(),
            "cache constructed"
        );

        Self {
            lines: (0..geometry.lines())
                .map(|i| CacheLine::new(i, geometry.block_size()))
                .collect(),
            geometry,
            memory,
            write_policy,
            replacement,
            policy,
            seen_blocks: HashSet::new(),
            stats: CacheStats::default(),
        }
    }

    /// Creates a direct-mapped cache: one line per set.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `lines` or `block_size` is zero.
    pub fn direct_mapped(
        lines: usize,
        block_size: usize,
        memory: BackingMemory,
        write_policy: WritePolicy,
    ) -> Result<Self> {
        let geometry = CacheGeometry::new(lines, block_size, 1)?;
        Ok(Self::new(
            geometry,
            memory,
            PolicyType::Lru,
            write_policy,
            None,
        ))
    }

    /// Creates a `ways`-way set-associative cache.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if any dimension is zero or
    /// `ways` does not evenly divide `lines`.
    pub fn set_associative(
        lines: usize,
        block_size: usize,
        ways: usize,
        memory: BackingMemory,
        replacement: PolicyType,
        write_policy: WritePolicy,
    ) -> Result<Self> {
        let geometry = CacheGeometry::new(lines, block_size, ways)?;
        Ok(Self::new(geometry, memory, replacement, write_policy, None))
    }

    /// Creates a fully-associative cache: a single set holding every line.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `lines` or `block_size` is zero.
    pub fn fully_associative(
        lines: usize,
        block_size: usize,
        memory: BackingMemory,
        replacement: PolicyType,
        write_policy: WritePolicy,
    ) -> Result<Self> {
        Self::set_associative(lines, block_size, lines, memory, replacement, write_policy)
    }

    /// Creates a cache from a [`CacheConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the configured geometry is inconsistent.
    pub fn from_config(config: &CacheConfig, memory: BackingMemory) -> Result<Self> {
        let geometry = CacheGeometry::new(config.lines, config.block_size, config.effective_ways())?;
        Ok(Self::new(
            geometry,
            memory,
            config.policy,
            config.write_policy,
            config.seed,
        ))
    }

    /// Reads `address` through the cache.
    ///
    /// On a hit only the replacement state changes. On a miss the block is
    /// fetched from memory, first flushing a dirty victim. No word is returned;
    /// the outcome describes what the access did.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`] if `address` is not below the memory
    /// size. No state changes in that case.
    pub fn read(&mut self, address: usize) -> Result<AccessOutcome> {
        self.check_bounds(address)?;
        let details = self.geometry.decompose(address);

        let outcome = match self.lookup(&details) {
            Some(line) => self.hit(AccessType::Read, details, line),
            None => self.miss(AccessType::Read, details)?,
        };

        self.stats.record(&outcome);
        trace!(%outcome, "read");
        Ok(outcome)
    }

    /// Writes `value` to `address` through the cache.
    ///
    /// The block is brought in on a miss exactly as for a read; the word is
    /// then stored in the resident line. Write-through mirrors the word to
    /// memory immediately and keeps the line clean; write-back marks it dirty.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`] if `address` is not below the memory
    /// size. No state changes in that case.
    pub fn write(&mut self, address: usize, value: impl Into<Word>) -> Result<AccessOutcome> {
        self.check_bounds(address)?;
        let value = value.into();
        let details = self.geometry.decompose(address);

        let outcome = match self.lookup(&details) {
            Some(line) => self.hit(AccessType::Write, details, line),
            None => self.miss(AccessType::Write, details)?,
        };

        let dirty = match self.write_policy {
            WritePolicy::WriteThrough => {
                self.memory.write(address, value.clone())?;
                false
            }
            WritePolicy::WriteBack => true,
        };
        self.lines[outcome.line].store(details.offset, value, dirty);

        self.stats.record(&outcome);
        trace!(%outcome, dirty, "write");
        Ok(outcome)
    }

    /// Returns `true` if the block holding `address` is resident.
    ///
    /// Does not touch replacement state or counters.
    pub fn contains(&self, address: usize) -> bool {
        self.lookup(&self.geometry.decompose(address)).is_some()
    }

    /// Writes every dirty line back to memory, leaving it valid and clean.
    ///
    /// # Returns
    ///
    /// The number of lines written back.
    ///
    /// # Errors
    ///
    /// Propagates memory write failures; none occur for blocks the cache filled itself.
    pub fn flush(&mut self) -> Result<usize> {
        let mut flushed = 0;
        for idx in 0..self.lines.len() {
            if let Some(block) = self.dirty_block(idx) {
                self.write_back(idx, block)?;
                flushed += 1;
            }
        }
        self.stats.writebacks += flushed as u64;
        debug!(flushed, "cache flushed");
        Ok(flushed)
    }

    /// Invalidates every line and clears counters and replacement history.
    ///
    /// Dirty data is discarded, not written back; backing memory is untouched.
    pub fn reset(&mut self) {
        for line in &mut self.lines {
            line.invalidate();
        }
        self.policy.reset();
        self.seen_blocks.clear();
        self.stats = CacheStats::default();
        debug!("cache reset");
    }

    /// Lines in slot order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Aggregate counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of hits so far.
    pub const fn hits(&self) -> u64 {
        self.stats.hits
    }

    /// Number of misses so far.
    pub const fn misses(&self) -> u64 {
        self.stats.misses
    }

    /// Words per block.
    pub const fn block_size(&self) -> usize {
        self.geometry.block_size()
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.geometry.num_sets()
    }

    /// Lines per set.
    pub const fn associativity(&self) -> usize {
        self.geometry.ways()
    }

    /// Cache shape.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Configured write policy.
    pub const fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// Configured replacement policy.
    pub const fn replacement_policy(&self) -> PolicyType {
        self.replacement
    }

    /// Backing memory.
    pub const fn memory(&self) -> &BackingMemory {
        &self.memory
    }

    /// Mutable backing memory, for direct writes that bypass the cache.
    pub const fn memory_mut(&mut self) -> &mut BackingMemory {
        &mut self.memory
    }

    fn check_bounds(&self, address: usize) -> Result<()> {
        let size = self.memory.size();
        if address < size {
            Ok(())
        } else {
            Err(SimError::OutOfRange { address, size })
        }
    }

    fn candidates(&self, details: &AccessDetails) -> Range<usize> {
        self.geometry.candidates(details.set)
    }

    fn lookup(&self, details: &AccessDetails) -> Option<usize> {
        self.candidates(details)
            .find(|&idx| self.lines[idx].matches(details.tag))
    }

    fn hit(&mut self, access: AccessType, details: AccessDetails, line: usize) -> AccessOutcome {
        self.policy.touch(line, Touch::Hit);
        AccessOutcome {
            access,
            kind: AccessKind::Hit,
            details,
            line,
            eviction: None,
        }
    }

    fn miss(&mut self, access: AccessType, details: AccessDetails) -> Result<AccessOutcome> {
        let kind = if self.seen_blocks.insert(details.block) {
            AccessKind::Compulsory
        } else {
            AccessKind::Conflict
        };

        let victim = self.choose_victim(self.candidates(&details));
        let eviction = self.evict(victim)?;

        let data = self.memory.read_block(
            self.geometry.block_base(details.block),
            self.geometry.block_size(),
        );
        self.lines[victim].fill(details.tag, data);
        self.policy.touch(victim, Touch::Fill);

        Ok(AccessOutcome {
            access,
            kind,
            details,
            line: victim,
            eviction,
        })
    }

    /// Lowest-indexed invalid candidate, otherwise the policy's choice.
    fn choose_victim(&mut self, candidates: Range<usize>) -> usize {
        candidates
            .clone()
            .find(|&idx| !self.lines[idx].is_valid())
            .unwrap_or_else(|| self.policy.victim(candidates))
    }

    /// Displaces whatever valid block `idx` holds, flushing it if dirty.
    fn evict(&mut self, idx: usize) -> Result<Option<Eviction>> {
        let Some(tag) = self.lines[idx].tag() else {
            return Ok(None);
        };
        let block = self
            .geometry
            .block_number(tag, self.geometry.set_of_line(idx));
        let written_back = self.lines[idx].is_dirty();
        if written_back {
            self.write_back(idx, block)?;
        }

        let eviction = Eviction {
            line: idx,
            block,
            base_address: self.geometry.block_base(block),
            written_back,
        };
        debug!(line = idx, block, written_back, "evicted block");
        Ok(Some(eviction))
    }

    /// Block number held by `idx` if it is valid and dirty.
    fn dirty_block(&self, idx: usize) -> Option<usize> {
        let line = &self.lines[idx];
        let tag = line.tag()?;
        line.is_dirty()
            .then(|| self.geometry.block_number(tag, self.geometry.set_of_line(idx)))
    }

    /// Copies line `idx` to memory as block `block` and marks it clean.
    ///
    /// Positions past the end of memory are skipped; they were filled with
    /// the empty word and no in-range write can reach them.
    fn write_back(&mut self, idx: usize, block: usize) -> Result<()> {
        let base = self.geometry.block_base(block);
        let size = self.memory.size();
        for (offset, word) in self.lines[idx].data().iter().enumerate() {
            let address = base + offset;
            if address < size {
                self.memory.write(address, word.clone())?;
            }
        }
        self.lines[idx].mark_clean();
        debug!(block, base, "wrote back dirty block");
        Ok(())
    }
}

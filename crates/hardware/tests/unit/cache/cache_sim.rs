//! Cache Engine (CacheSim) Unit Tests.
//!
//! Verifies hit/miss logic, victim selection, clean replacement, bounds
//! checking, partial blocks at the end of memory and reset. Every cache is
//! built over a labeled memory where address `i` holds `"m{i}"`.

use cachesim_core::cache::{AccessKind, CacheModel, CacheSim};
use cachesim_core::common::{SimError, Word};
use cachesim_core::config::{ReplacementPolicy as PolicyType, WritePolicy};

use crate::common::{label, set_associative};

/// 8 lines, 2-word blocks, 2-way, LRU, write-back, 64 words of memory.
///
///   - num_sets  = 8 / 2 = 4
///   - block     = addr / 2
///   - set       = block % 4
///   - tag       = block / 4
fn test_cache() -> CacheSim {
    set_associative(8, 2, 2, 64, PolicyType::Lru, WritePolicy::WriteBack)
}

// ══════════════════════════════════════════════════════════
// 1. Cold Miss
// ══════════════════════════════════════════════════════════

/// First access to an address is a compulsory miss into the first free line.
#[test]
fn cold_miss_fills_first_line_of_set() {
    let mut cache = test_cache();
    let outcome = cache.read(0).unwrap();

    assert!(!outcome.is_hit());
    assert_eq!(outcome.kind(), AccessKind::Compulsory);
    assert_eq!(outcome.eviction, None);
    assert_eq!(outcome.eviction_message(), None);
    assert_eq!(outcome.line, 0);

    let line = &cache.lines()[0];
    assert!(line.is_valid());
    assert!(!line.is_dirty());
    assert_eq!(line.tag(), Some(0));
    assert_eq!(line.data(), &[label(0), label(1)]);
    assert_eq!((cache.hits(), cache.misses()), (0, 1));
}

/// address 13 -> block 6, set 2, tag 1; lands in line 4 (first of set 2).
#[test]
fn miss_reports_decomposition() {
    let mut cache = test_cache();
    let outcome = cache.read(13).unwrap();
    let d = outcome.details();
    assert_eq!((d.block, d.set, d.tag, d.offset), (6, 2, 1, 1));
    assert_eq!(outcome.line, 4);
    assert_eq!(cache.lines()[4].data(), &[label(12), label(13)]);
}

// ══════════════════════════════════════════════════════════
// 2. Warm Hit
// ══════════════════════════════════════════════════════════

/// A hit followed by the same read hits again; only `hits` moves.
#[test]
fn idempotent_reread() {
    let mut cache = test_cache();
    assert!(!cache.read(5).unwrap().is_hit());
    assert!(cache.read(5).unwrap().is_hit());

    let (hits, misses) = (cache.hits(), cache.misses());
    let again = cache.read(5).unwrap();
    assert!(again.is_hit());
    assert_eq!(again.kind(), AccessKind::Hit);
    assert_eq!(cache.hits(), hits + 1);
    assert_eq!(cache.misses(), misses);
}

/// The other word of the same block hits.
#[test]
fn same_block_different_offset_hits() {
    let mut cache = test_cache();
    let _ = cache.read(4).unwrap();
    let outcome = cache.read(5).unwrap();
    assert!(outcome.is_hit());
    assert_eq!(outcome.details().offset, 1);
}

// ══════════════════════════════════════════════════════════
// 3. Victim Selection
// ══════════════════════════════════════════════════════════

/// Invalid lines are always filled before anything is evicted.
#[test]
fn fills_invalid_lines_before_evicting() {
    let mut cache = set_associative(4, 1, 4, 16, PolicyType::Random, WritePolicy::WriteBack);
    for (addr, expected_line) in [(3, 0), (7, 1), (1, 2), (12, 3)] {
        let outcome = cache.read(addr).unwrap();
        assert_eq!(outcome.line, expected_line);
        assert_eq!(outcome.eviction, None);
    }
    assert!(cache.lines().iter().all(|l| l.is_valid()));
}

/// Blocks in one set never displace blocks in another.
#[test]
fn sets_are_independent() {
    // 4 lines, 1-word blocks, 2 ways -> 2 sets; even addresses -> set 0.
    let mut cache = set_associative(4, 1, 2, 16, PolicyType::Lru, WritePolicy::WriteBack);
    let _ = cache.read(1).unwrap();
    for addr in [0, 2, 4, 6, 8] {
        let _ = cache.read(addr).unwrap();
    }
    assert!(cache.contains(1));
    assert!(cache.contains(6));
    assert!(cache.contains(8));
    assert!(!cache.contains(0));
}

/// One set, two ways: A, B, A (hit), C.
/// LRU evicts B; FIFO evicts A.
#[test]
fn lru_and_fifo_diverge() {
    let run = |policy| {
        let mut cache = set_associative(2, 1, 2, 8, policy, WritePolicy::WriteBack);
        let _ = cache.read(0).unwrap(); // A
        let _ = cache.read(1).unwrap(); // B
        assert!(cache.read(0).unwrap().is_hit());
        let outcome = cache.read(2).unwrap(); // C
        (cache, outcome)
    };

    let (lru, outcome) = run(PolicyType::Lru);
    let evicted = outcome.eviction.unwrap();
    assert_eq!(evicted.block, 1, "LRU evicts B");
    assert!(lru.contains(0));
    assert!(!lru.contains(1));
    assert!(lru.contains(2));

    let (fifo, outcome) = run(PolicyType::Fifo);
    let evicted = outcome.eviction.unwrap();
    assert_eq!(evicted.block, 0, "FIFO evicts A");
    assert!(!fifo.contains(0));
    assert!(fifo.contains(1));
    assert!(fifo.contains(2));
}

/// LRU over four ways follows full recency order.
#[test]
fn lru_four_way_recency_order() {
    let mut cache = set_associative(4, 1, 4, 32, PolicyType::Lru, WritePolicy::WriteBack);
    for addr in [0, 1, 2, 3] {
        let _ = cache.read(addr).unwrap();
    }
    for addr in [0, 2, 1] {
        assert!(cache.read(addr).unwrap().is_hit());
    }
    // Recency: 3 (oldest), 0, 2, 1.
    assert_eq!(cache.read(4).unwrap().eviction.unwrap().block, 3);
    assert_eq!(cache.read(5).unwrap().eviction.unwrap().block, 0);
}

/// Random replacement under the same seed replays the same evictions.
#[test]
fn random_replacement_reproducible_from_config_seed() {
    use cachesim_core::config::{CacheConfig, Organization};
    use cachesim_core::memory::BackingMemory;

    let config = CacheConfig {
        organization: Organization::FullyAssociative,
        lines: 4,
        block_size: 1,
        policy: PolicyType::Random,
        seed: Some(99),
        ..CacheConfig::default()
    };
    let trace: Vec<usize> = (0..200).map(|i| (i * 7) % 23).collect();
    let run = || {
        let mut cache = CacheSim::from_config(&config, BackingMemory::with_seed(32, 1)).unwrap();
        trace
            .iter()
            .map(|&a| cache.read(a).unwrap().eviction.map(|e| e.block))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

// ══════════════════════════════════════════════════════════
// 4. Clean Replacement
// ══════════════════════════════════════════════════════════

/// A clean victim is reported as replaced, with no write-back message.
#[test]
fn clean_eviction_has_no_message() {
    let mut cache = set_associative(2, 1, 2, 8, PolicyType::Lru, WritePolicy::WriteBack);
    let _ = cache.read(0).unwrap();
    let _ = cache.read(1).unwrap();
    let before = cache.memory().clone();

    let outcome = cache.read(2).unwrap();
    let eviction = outcome.eviction.unwrap();
    assert!(!eviction.written_back);
    assert_eq!(eviction.block, 0);
    assert_eq!(eviction.base_address, 0);
    assert_eq!(outcome.eviction_message(), None);
    assert_eq!(cache.memory(), &before);
}

// ══════════════════════════════════════════════════════════
// 5. Bounds
// ══════════════════════════════════════════════════════════

/// Reads at `size` fail and leave the cache untouched.
#[test]
fn read_at_memory_size_is_out_of_range() {
    let mut cache = test_cache();
    let size = cache.memory().size();
    match cache.read(size) {
        Err(SimError::OutOfRange { address, size: s }) => {
            assert_eq!(address, size);
            assert_eq!(s, size);
        }
        other => panic!("expected OutOfRange, got {other:?}"),
    }
    assert_eq!(cache.stats().accesses(), 0);
    assert!(cache.lines().iter().all(|l| !l.is_valid()));
}

/// Writes at `size` fail too.
#[test]
fn write_at_memory_size_is_out_of_range() {
    let mut cache = test_cache();
    let size = cache.memory().size();
    assert!(matches!(
        cache.write(size, "X"),
        Err(SimError::OutOfRange { .. })
    ));
    assert_eq!(cache.stats().accesses(), 0);
}

/// The last block may extend past memory; its tail fills with empty words.
#[test]
fn partial_block_at_end_of_memory() {
    // 10 words, 4-word blocks: block 2 covers 8..12.
    let mut cache = set_associative(2, 4, 1, 10, PolicyType::Lru, WritePolicy::WriteBack);
    let outcome = cache.read(9).unwrap();
    assert_eq!(outcome.details().block, 2);
    let line = &cache.lines()[outcome.line];
    assert_eq!(line.data(), &[label(8), label(9), Word::EMPTY, Word::EMPTY]);
}

// ══════════════════════════════════════════════════════════
// 6. Contains / Reset / Interface
// ══════════════════════════════════════════════════════════

/// `contains` is a pure probe.
#[test]
fn contains_does_not_change_state() {
    let mut cache = set_associative(2, 1, 2, 8, PolicyType::Lru, WritePolicy::WriteBack);
    let _ = cache.read(0).unwrap();
    let _ = cache.read(1).unwrap();
    let stats = cache.stats().clone();

    // Probing 0 must not refresh it for LRU.
    assert!(cache.contains(0));
    assert!(!cache.contains(2));
    assert_eq!(cache.stats(), &stats);

    assert_eq!(cache.read(2).unwrap().eviction.unwrap().block, 0);
}

/// Reset invalidates everything and forgets history.
#[test]
fn reset_returns_to_cold_state() {
    let mut cache = test_cache();
    let _ = cache.read(0).unwrap();
    let _ = cache.write(3, "W").unwrap();
    cache.reset();

    assert!(cache.lines().iter().all(|l| !l.is_valid() && !l.is_dirty()));
    assert_eq!(cache.stats().accesses(), 0);
    assert_eq!(cache.read(0).unwrap().kind(), AccessKind::Compulsory);
    // Dirty data was discarded, not written back.
    assert_eq!(cache.memory().read(3).unwrap(), &label(3));
}

/// Lines keep their slot index through any traffic.
#[test]
fn line_indices_are_stable() {
    let mut cache = test_cache();
    for addr in 0..40 {
        let _ = cache.read(addr).unwrap();
    }
    for (i, line) in cache.lines().iter().enumerate() {
        assert_eq!(line.index(), i);
    }
}

/// The trait object exposes the same behavior as the concrete engine.
#[test]
fn cache_model_trait_object() {
    let mut cache = test_cache();
    let model: &mut dyn CacheModel = &mut cache;
    assert!(!model.read(8).unwrap().is_hit());
    assert!(model.write(9, Word::from("V")).unwrap().is_hit());
    assert_eq!(model.hits(), 1);
    assert_eq!(model.misses(), 1);
    assert_eq!(model.block_size(), 2);
    assert_eq!(model.lines().len(), 8);
    assert_eq!(model.stats().writes, 1);
}

/// Outcome text carries the access, kind and location.
#[test]
fn outcome_display() {
    let mut cache = test_cache();
    let text = cache.read(13).unwrap().to_string();
    assert_eq!(text, "read 13: Compulsory [Block: 6 | Set: 2 | Tag: 1] line 4");
}

//! Cache Geometry Tests.
//!
//! Validation at construction and the decomposition/reconstruction pair.

use cachesim_core::cache::CacheGeometry;
use cachesim_core::common::ConfigError;

#[test]
fn rejects_zero_lines() {
    assert_eq!(CacheGeometry::new(0, 1, 1), Err(ConfigError::ZeroLines));
}

#[test]
fn rejects_zero_block_size() {
    assert_eq!(CacheGeometry::new(4, 0, 1), Err(ConfigError::ZeroBlockSize));
}

#[test]
fn rejects_zero_ways() {
    assert_eq!(
        CacheGeometry::new(4, 1, 0),
        Err(ConfigError::ZeroAssociativity)
    );
}

#[test]
fn rejects_ways_not_dividing_lines() {
    assert_eq!(
        CacheGeometry::new(6, 1, 4),
        Err(ConfigError::UnevenSets { lines: 6, ways: 4 })
    );
}

#[test]
fn derives_num_sets() {
    let g = CacheGeometry::new(8, 2, 2).unwrap();
    assert_eq!(g.lines(), 8);
    assert_eq!(g.block_size(), 2);
    assert_eq!(g.ways(), 2);
    assert_eq!(g.num_sets(), 4);
}

/// 8 lines, 2-word blocks, 2 ways -> 4 sets.
/// address 21: block 10, offset 1, set 10 % 4 = 2, tag 10 / 4 = 2.
#[test]
fn decompose_set_associative() {
    let g = CacheGeometry::new(8, 2, 2).unwrap();
    let d = g.decompose(21);
    assert_eq!(d.block, 10);
    assert_eq!(d.offset, 1);
    assert_eq!(d.set, 2);
    assert_eq!(d.tag, 2);
    assert_eq!(g.candidates(d.set), 4..6);
}

/// Direct-mapped: the set index is the line index and tag = block / lines.
#[test]
fn decompose_direct_mapped() {
    let g = CacheGeometry::new(4, 1, 1).unwrap();
    let d = g.decompose(9);
    assert_eq!(d.block, 9);
    assert_eq!(d.set, 1);
    assert_eq!(d.tag, 2);
    assert_eq!(g.candidates(d.set), 1..2);
}

#[test]
fn fully_associative_has_one_set() {
    let g = CacheGeometry::new(4, 2, 4).unwrap();
    assert_eq!(g.num_sets(), 1);
    for addr in [0, 7, 31, 1000] {
        let d = g.decompose(addr);
        assert_eq!(d.set, 0);
        assert_eq!(d.tag, d.block);
        assert_eq!(g.candidates(d.set), 0..4);
    }
}

/// tag * num_sets + set reconstructs the block number for every address.
#[test]
fn reconstruction_inverts_decomposition() {
    for (lines, block, ways) in [(4, 1, 1), (8, 2, 2), (8, 4, 8), (12, 3, 3)] {
        let g = CacheGeometry::new(lines, block, ways).unwrap();
        for addr in 0..200 {
            let d = g.decompose(addr);
            let rebuilt = g.block_number(d.tag, d.set);
            assert_eq!(rebuilt, d.block, "geometry {lines}/{block}/{ways} addr {addr}");
            assert_eq!(g.block_base(rebuilt) + d.offset, addr);
        }
    }
}

#[test]
fn set_of_line_maps_candidates_back() {
    let g = CacheGeometry::new(8, 1, 2).unwrap();
    for set in 0..g.num_sets() {
        for line in g.candidates(set) {
            assert_eq!(g.set_of_line(line), set);
        }
    }
}

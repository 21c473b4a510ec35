//! Functional cache simulator library.
//!
//! This crate models a hardware cache in front of a word-addressed backing memory:
//! 1. **Memory:** Fixed-size, bounds-checked backing store with seedable random contents.
//! 2. **Cache:** One engine covering direct-mapped, set-associative and fully-associative organizations.
//! 3. **Policies:** LRU, FIFO and Random replacement; write-through and write-back writes.
//! 4. **Diagnostics:** Per-access outcomes (hit, compulsory or conflict miss, evictions) and aggregate statistics.
//! 5. **Configuration:** Serde-deserializable settings with defaults.

/// Common types (words, decomposed addresses, errors).
pub mod common;
/// Simulator configuration (defaults, enums, config structures).
pub mod config;
/// Cache engine, lines, outcomes and replacement policies.
pub mod cache;
/// Backing memory.
pub mod memory;
/// Cache statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// The cache engine.
pub use crate::cache::{CacheModel, CacheSim};
/// Word-addressed backing store.
pub use crate::memory::BackingMemory;
/// Error type returned by fallible operations.
pub use crate::common::SimError;

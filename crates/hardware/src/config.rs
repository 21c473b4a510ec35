//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums used to parameterize
//! a simulation. It provides:
//! 1. **Defaults:** Baseline geometry and memory constants.
//! 2. **Structures:** Memory and cache configuration, grouped under [`Config`].
//! 3. **Enums:** Organization, replacement policy and write policy selectors.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built from
//! `Config::default()` and adjusted field by field.

use serde::Deserialize;

use crate::common::Result;

/// Default configuration constants for the simulator.
mod defaults {
    /// Number of words in backing memory.
    pub const MEMORY_SIZE: usize = 64;

    /// Number of lines in the cache.
    pub const CACHE_LINES: usize = 8;

    /// Words per block.
    pub const BLOCK_SIZE: usize = 2;

    /// Lines per set for set-associative caches.
    pub const CACHE_WAYS: usize = 2;
}

/// Cache organization.
///
/// All three organizations are realized by the same engine; they differ only
/// in how many lines share a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Organization {
    /// One line per set; every block maps to exactly one line.
    #[serde(alias = "DIRECT_MAPPED", alias = "direct-mapped")]
    DirectMapped,
    /// `ways` lines per set.
    #[default]
    #[serde(alias = "SET_ASSOCIATIVE", alias = "set-associative")]
    SetAssociative,
    /// A single set containing every line.
    #[serde(alias = "FULLY_ASSOCIATIVE", alias = "fully-associative")]
    FullyAssociative,
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line to evict
/// when a new block must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line whose last hit or fill is oldest.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// First In First Out replacement policy.
    ///
    /// Evicts the line filled longest ago; hits do not refresh it.
    #[serde(alias = "Fifo")]
    Fifo,
    /// Random replacement policy.
    ///
    /// Evicts a uniformly chosen line from the set.
    #[serde(alias = "Random")]
    Random,
}

/// Cache write policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum WritePolicy {
    /// Every write is mirrored to backing memory immediately; lines stay clean.
    #[serde(alias = "WRITE_THROUGH")]
    WriteThrough,
    /// Writes mark the line dirty; memory is updated when the line is evicted.
    #[default]
    #[serde(alias = "WRITE_BACK")]
    WriteBack,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{Config, Organization, ReplacementPolicy, WritePolicy};
///
/// let json = r#"{
///     "memory": { "size": 32, "seed": 7 },
///     "cache": {
///         "organization": "SetAssociative",
///         "lines": 4,
///         "block_size": 2,
///         "ways": 2,
///         "policy": "FIFO",
///         "write_policy": "WriteThrough"
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.memory.size, 32);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Fifo);
/// assert_eq!(config.cache.write_policy, WritePolicy::WriteThrough);
/// assert_eq!(config.cache.organization, Organization::SetAssociative);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Backing memory configuration.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Cache geometry and policies.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// Missing sections and fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Parse`](crate::common::SimError::Parse) if the
    /// document is not valid JSON or contains unknown enum values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Backing memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Number of addressable words.
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,

    /// Seed for the initial contents; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MemoryConfig {
    /// Returns the default memory size in words.
    const fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
            seed: None,
        }
    }
}

/// Cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Cache organization
    #[serde(default)]
    pub organization: Organization,

    /// Total number of lines
    #[serde(default = "CacheConfig::default_lines")]
    pub lines: usize,

    /// Words per block
    #[serde(default = "CacheConfig::default_block_size")]
    pub block_size: usize,

    /// Associativity; only consulted for set-associative caches
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Write policy
    #[serde(default)]
    pub write_policy: WritePolicy,

    /// Seed for random replacement; `None` draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CacheConfig {
    /// Returns the default number of cache lines.
    const fn default_lines() -> usize {
        defaults::CACHE_LINES
    }

    /// Returns the default block size in words.
    const fn default_block_size() -> usize {
        defaults::BLOCK_SIZE
    }

    /// Returns the default associativity.
    const fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the associativity the engine should be built with.
    ///
    /// Direct-mapped caches always use one way and fully-associative caches
    /// use every line; `ways` is only honored for set-associative caches.
    pub const fn effective_ways(&self) -> usize {
        match self.organization {
            Organization::DirectMapped => 1,
            Organization::SetAssociative => self.ways,
            Organization::FullyAssociative => self.lines,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            organization: Organization::default(),
            lines: defaults::CACHE_LINES,
            block_size: defaults::BLOCK_SIZE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            write_policy: WritePolicy::default(),
            seed: None,
        }
    }
}

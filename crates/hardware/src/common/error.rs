//! Simulator error definitions.
//!
//! This module defines every failure the engine can report. It provides:
//! 1. **Runtime Errors:** Single-word accesses outside backing memory.
//! 2. **Configuration Errors:** Cache geometries that cannot be built.
//! 3. **Parse Errors:** Malformed JSON configuration documents.
//!
//! Block fills never fail; positions past the end of memory are filled with
//! [`Word::EMPTY`](crate::common::Word::EMPTY) instead.

use thiserror::Error;

/// Errors reported by the cache engine and backing memory.
#[derive(Debug, Error)]
pub enum SimError {
    /// A single-word access addressed a location outside backing memory.
    ///
    /// Raised by direct memory reads and writes, and by cache reads and
    /// writes whose address is not below the memory size. Addresses never
    /// wrap or clamp.
    #[error("address {address} out of range for memory of size {size}")]
    OutOfRange {
        /// The offending address.
        address: usize,
        /// Number of words in backing memory.
        size: usize,
    },

    /// The requested cache geometry is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// A configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reasons a cache geometry is rejected at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The cache must hold at least one line.
    #[error("line count must be greater than zero")]
    ZeroLines,

    /// Blocks must hold at least one word.
    #[error("block size must be greater than zero")]
    ZeroBlockSize,

    /// Sets must hold at least one line.
    #[error("associativity must be greater than zero")]
    ZeroAssociativity,

    /// The line count must split evenly into sets of `ways` lines.
    #[error("associativity {ways} does not evenly divide line count {lines}")]
    UnevenSets {
        /// Total number of lines requested.
        lines: usize,
        /// Requested associativity.
        ways: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

//! Memory Words and Access Types.
//!
//! This module defines the values that move between the cache and backing memory.
//! It provides the following:
//! 1. **Word:** An opaque storable value; the simulator never interprets it.
//! 2. **Access Type:** The classification of an engine operation (read or write).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single addressable memory word.
///
/// Words are opaque to the simulator. They are carried as text so that any
/// scalar a front-end wants to store (numbers, labels, markers) round-trips
/// unchanged. The empty word is the defined filler for block positions that
/// lie past the end of memory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// The empty word used for out-of-range block positions.
    pub const EMPTY: Self = Self(String::new());

    /// Creates a word from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the word's text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty filler word.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Word {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Word {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Type of cache operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Data read; brings the block into the cache, returns no word.
    Read,

    /// Data write; stores a word through the configured write policy.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

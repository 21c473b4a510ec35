//! Common types shared across the cache simulator.
//!
//! This module provides the fundamental building blocks used by memory and
//! cache alike. It includes:
//! 1. **Words:** The opaque value stored at each address.
//! 2. **Addresses:** The decomposed block/set/tag/offset view of an access.
//! 3. **Access Types:** Read vs. write classification.
//! 4. **Error Handling:** Runtime and configuration errors.

/// Decomposed address record.
pub mod addr;

/// Memory words and access types.
pub mod data;

/// Error types.
pub mod error;

pub use addr::AccessDetails;
pub use data::{AccessType, Word};
pub use error::{ConfigError, Result, SimError};

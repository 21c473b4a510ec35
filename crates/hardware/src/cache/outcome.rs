//! Per-access results.
//!
//! Every read and write returns an [`AccessOutcome`] describing what just
//! happened: where the address landed, whether it hit, how a miss is
//! classified, and which block (if any) was displaced to make room.

use std::fmt;

use crate::common::{AccessDetails, AccessType};

/// Hit, or the class of a miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// The block was resident.
    Hit,
    /// First-ever reference to the block by this cache.
    Compulsory,
    /// The block was fetched before but is no longer resident.
    Conflict,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => f.write_str("Hit"),
            Self::Compulsory => f.write_str("Compulsory"),
            Self::Conflict => f.write_str("Conflict"),
        }
    }
}

/// A valid block displaced by a fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eviction {
    /// Line the block occupied.
    pub line: usize,
    /// Block number of the displaced block.
    pub block: usize,
    /// First word address of the displaced block.
    pub base_address: usize,
    /// Whether the block was dirty and flushed to memory first.
    pub written_back: bool,
}

impl fmt::Display for Eviction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.written_back {
            write!(
                f,
                "Evicted dirty block {} to memory and wrote to address {}",
                self.block, self.base_address
            )
        } else {
            write!(f, "Replaced clean block {} from line {}", self.block, self.line)
        }
    }
}

/// Result of a single cache read or write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Operation that produced this outcome.
    pub access: AccessType,
    /// Hit or miss class.
    pub kind: AccessKind,
    /// Address decomposition.
    pub details: AccessDetails,
    /// Line that now holds the block.
    pub line: usize,
    /// Block displaced by the fill, if a valid one was replaced.
    pub eviction: Option<Eviction>,
}

impl AccessOutcome {
    /// `true` if the access hit.
    pub fn is_hit(&self) -> bool {
        self.kind == AccessKind::Hit
    }

    /// Hit or miss class.
    pub const fn kind(&self) -> AccessKind {
        self.kind
    }

    /// Block, set, tag and offset the address resolved to.
    pub const fn details(&self) -> AccessDetails {
        self.details
    }

    /// Message describing a dirty write-back, if one happened.
    ///
    /// Clean replacements and fills into empty lines produce no message.
    pub fn eviction_message(&self) -> Option<String> {
        self.eviction
            .filter(|e| e.written_back)
            .map(|e| e.to_string())
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {} line {}",
            self.access, self.details.address, self.kind, self.details, self.line
        )?;
        if let Some(msg) = self.eviction_message() {
            write!(f, " ({msg})")?;
        }
        Ok(())
    }
}

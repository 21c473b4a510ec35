//! Cache line storage.

use crate::common::Word;

/// One slot of the cache: a block of words plus its tag and status bits.
///
/// The tag is only meaningful while `valid` is set. Lines are created invalid
/// and become valid on their first fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheLine {
    index: usize,
    valid: bool,
    dirty: bool,
    tag: usize,
    data: Vec<Word>,
}

impl CacheLine {
    /// Creates an invalid, empty line for slot `index`.
    pub(crate) fn new(index: usize, block_size: usize) -> Self {
        Self {
            index,
            valid: false,
            dirty: false,
            tag: 0,
            data: vec![Word::EMPTY; block_size],
        }
    }

    /// Slot number, fixed at construction.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Whether the line holds a block.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the line differs from backing memory.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Tag of the resident block, or `None` if the line is invalid.
    pub const fn tag(&self) -> Option<usize> {
        if self.valid { Some(self.tag) } else { None }
    }

    /// The block's words.
    pub fn data(&self) -> &[Word] {
        &self.data
    }

    pub(crate) const fn matches(&self, tag: usize) -> bool {
        self.valid && self.tag == tag
    }

    /// Installs a freshly fetched block; the line becomes valid and clean.
    pub(crate) fn fill(&mut self, tag: usize, data: Vec<Word>) {
        self.tag = tag;
        self.valid = true;
        self.dirty = false;
        self.data = data;
    }

    /// Stores `value` at `offset` and sets the dirty bit to `dirty`.
    pub(crate) fn store(&mut self, offset: usize, value: Word, dirty: bool) {
        self.data[offset] = value;
        self.dirty = dirty;
    }

    pub(crate) const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Returns the line to its initial invalid state.
    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
        self.dirty = false;
        self.tag = 0;
        self.data.fill(Word::EMPTY);
    }
}

//! Text selection handling.
//!
//! ## Learning: Range Types
//!
//! A selection is an exclusive range of character offsets. Exclusive ends
//! make the caret case (`start == end`) natural and keep the arithmetic
//! simple: the selected length is always `end - start`.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A selection of text in the buffer, as absolute character offsets.
///
/// The start is always before or equal to the end (normalized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Selection {
    /// Creates a new selection.
    ///
    /// Automatically normalizes so start <= end.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Creates a zero-width selection (caret).
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns true if nothing is selected.
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The selection as a character range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns true if both ends fit a buffer of `len` characters.
    pub fn fits(&self, len: usize) -> bool {
        self.start <= self.end && self.end <= len
    }

    /// Clamps both ends into a buffer of `len` characters.
    pub fn clamp(&self, len: usize) -> Selection {
        Selection::new(self.start.min(len), self.end.min(len))
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Selection::new(range.start, range.end)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_caret() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

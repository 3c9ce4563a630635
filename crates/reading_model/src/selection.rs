//! Selection model - the transient text range a user is working with

use crate::Paragraph;
use serde::{Deserialize, Serialize};

/// A half-open range of grapheme offsets within one paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Build a range from two offsets in either order
    pub fn ordered(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Empty or reversed ranges cover no text
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether this is a non-empty range inside a text of `len` graphemes
    pub fn fits(&self, len: usize) -> bool {
        !self.is_empty() && self.end <= len
    }

    /// Clamp both ends to `[0, len]`
    pub fn clamped(&self, len: usize) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }

    /// The midpoint offset, used for positioning overlays
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) as f64 / 2.0
    }
}

/// A user-made text selection inside a single paragraph.
///
/// Invariant: `start < end <= paragraph length`, and `text` is exactly the
/// paragraph's graphemes in that range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// The selected text
    pub text: String,
    /// Start grapheme offset (inclusive)
    pub start: usize,
    /// End grapheme offset (exclusive)
    pub end: usize,
    /// Paragraph the selection belongs to
    pub paragraph_index: usize,
}

impl Selection {
    /// Build a selection from raw surface offsets.
    ///
    /// Offsets may arrive in either order and may be stale relative to the
    /// text; they are ordered and clamped first. Returns `None` when nothing
    /// is left to select.
    pub fn new_clamped(
        paragraph_index: usize,
        paragraph: &Paragraph,
        a: usize,
        b: usize,
    ) -> Option<Self> {
        let range = TextRange::ordered(a, b).clamped(paragraph.len());
        if range.is_empty() {
            return None;
        }

        Some(Self {
            text: paragraph.slice(range.start, range.end).to_string(),
            start: range.start,
            end: range.end,
            paragraph_index,
        })
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    /// Check the selection still describes this paragraph's text
    pub fn matches(&self, paragraph: &Paragraph) -> bool {
        self.range().fits(paragraph.len()) && paragraph.slice(self.start, self.end) == self.text
    }
}

//! Paragraph and document text model
//!
//! Reading content is fixed when a section is loaded. Offsets used by
//! selections and highlights are grapheme-cluster indices, so a user can
//! never select half of an emoji or a combining sequence.

use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// A single immutable paragraph of reading content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Paragraph {
    text: String,
    /// Byte offset of each grapheme start, followed by `text.len()`
    boundaries: Vec<usize>,
}

impl Paragraph {
    /// Create a paragraph from its text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut boundaries: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    /// The full paragraph text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in grapheme clusters
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clamp a grapheme offset to `[0, len]`
    pub fn clamp_offset(&self, offset: usize) -> usize {
        offset.min(self.len())
    }

    /// Byte offset of a grapheme offset (clamped)
    pub fn byte_offset(&self, offset: usize) -> usize {
        self.boundaries[self.clamp_offset(offset)]
    }

    /// Text between two grapheme offsets.
    ///
    /// Both ends are clamped to the paragraph, and a reversed pair yields an
    /// empty string, so this never panics.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let start = self.clamp_offset(start);
        let end = self.clamp_offset(end).max(start);
        &self.text[self.byte_offset(start)..self.byte_offset(end)]
    }
}

impl From<String> for Paragraph {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<Paragraph> for String {
    fn from(paragraph: Paragraph) -> Self {
        paragraph.text
    }
}

/// The reading content of one book section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Book title shown in the reading toolbar and chat header
    pub title: String,
    paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new<P>(title: impl Into<String>, paragraphs: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<Paragraph>,
    {
        Self {
            title: title.into(),
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
        }
    }

    /// Look up a paragraph by position
    pub fn paragraph(&self, index: usize) -> Result<&Paragraph> {
        self.paragraphs
            .get(index)
            .ok_or(ModelError::ParagraphOutOfRange {
                index,
                count: self.paragraphs.len(),
            })
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

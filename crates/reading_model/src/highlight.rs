//! Highlights and the in-session highlight store

use crate::{Selection, TextRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A committed highlight. Same shape as the selection it was made from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub paragraph_index: usize,
}

impl Highlight {
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }
}

impl From<Selection> for Highlight {
    fn from(selection: Selection) -> Self {
        Self {
            text: selection.text,
            start: selection.start,
            end: selection.end,
            paragraph_index: selection.paragraph_index,
        }
    }
}

/// Ordered, append-only list of highlights for the current session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStore {
    highlights: Vec<Highlight>,
}

impl HighlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a highlight. Highlights are never edited or removed.
    pub fn append(&mut self, highlight: Highlight) {
        self.highlights.push(highlight);
    }

    /// All highlights of one paragraph, in insertion order
    pub fn query_by_paragraph(&self, paragraph_index: usize) -> Vec<&Highlight> {
        self.highlights
            .iter()
            .filter(|h| h.paragraph_index == paragraph_index)
            .collect()
    }

    /// Highlights grouped by paragraph, for the highlights list
    pub fn grouped_by_paragraph(&self) -> BTreeMap<usize, Vec<&Highlight>> {
        let mut groups: BTreeMap<usize, Vec<&Highlight>> = BTreeMap::new();
        for highlight in &self.highlights {
            groups.entry(highlight.paragraph_index).or_default().push(highlight);
        }
        groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &Highlight> {
        self.highlights.iter()
    }

    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(paragraph_index: usize, start: usize, end: usize) -> Highlight {
        Highlight {
            text: "x".repeat(end - start),
            start,
            end,
            paragraph_index,
        }
    }

    #[test]
    fn test_highlight_from_selection() {
        let sel = Selection {
            text: "authority".to_string(),
            start: 43,
            end: 52,
            paragraph_index: 5,
        };
        let h = Highlight::from(sel);
        assert_eq!(h.text, "authority");
        assert_eq!(h.range(), TextRange::new(43, 52));
        assert_eq!(h.paragraph_index, 5);
    }

    #[test]
    fn test_query_by_paragraph_keeps_insertion_order() {
        let mut store = HighlightStore::new();
        store.append(highlight(1, 10, 12));
        store.append(highlight(2, 0, 3));
        store.append(highlight(1, 2, 4));

        let found = store.query_by_paragraph(1);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].start, 10);
        assert_eq!(found[1].start, 2);
        assert!(store.query_by_paragraph(7).is_empty());
    }

    #[test]
    fn test_grouped_by_paragraph() {
        let mut store = HighlightStore::new();
        store.append(highlight(3, 0, 1));
        store.append(highlight(0, 0, 1));
        store.append(highlight(3, 4, 5));

        let groups = store.grouped_by_paragraph();
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec![0, 3]);
        assert_eq!(groups[&3].len(), 2);
        assert_eq!(store.len(), 3);
    }
}

//! Highlight rendering
//!
//! Splits a paragraph into plain and highlighted segments. The output
//! borrows from the paragraph and concatenates back to exactly its text.

use crate::{Highlight, Paragraph, TextRange};
use serde::{Deserialize, Serialize};

/// A contiguous piece of paragraph text with one style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// A paragraph broken into styled segments
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StyledRun<'a> {
    pub segments: Vec<Segment<'a>>,
}

impl<'a> StyledRun<'a> {
    /// The whole text as a single plain segment
    pub fn plain(text: &'a str) -> Self {
        Self {
            segments: vec![Segment {
                text,
                highlighted: false,
            }],
        }
    }

    /// Concatenated text of all segments
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text).collect()
    }

    /// Segment texts in order
    pub fn texts(&self) -> Vec<&'a str> {
        self.segments.iter().map(|s| s.text).collect()
    }

    pub fn has_highlight(&self) -> bool {
        self.segments.iter().any(|s| s.highlighted)
    }

    pub fn highlighted_texts(&self) -> Vec<&'a str> {
        self.segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text)
            .collect()
    }
}

/// Which highlights of a paragraph are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightPolicy {
    /// Draw every highlight, merging overlapping ranges
    #[default]
    RenderAll,
    /// Draw only the first highlight added to the paragraph
    RenderFirst,
}

/// Render a paragraph with at most one highlighted range.
///
/// An absent, empty, reversed or out-of-bounds range renders the paragraph
/// as plain text.
pub fn render_range(paragraph: &Paragraph, range: Option<TextRange>) -> StyledRun<'_> {
    match range {
        Some(range) if range.fits(paragraph.len()) => split(paragraph, &[range]),
        _ => StyledRun::plain(paragraph.text()),
    }
}

/// Render a paragraph with its highlights according to `policy`
pub fn render_paragraph<'a>(
    paragraph: &'a Paragraph,
    highlights: &[&Highlight],
    policy: HighlightPolicy,
) -> StyledRun<'a> {
    match policy {
        HighlightPolicy::RenderFirst => {
            render_range(paragraph, highlights.first().map(|h| h.range()))
        }
        HighlightPolicy::RenderAll => {
            let ranges = merge_ranges(highlights.iter().map(|h| h.range()), paragraph.len());
            if ranges.is_empty() {
                StyledRun::plain(paragraph.text())
            } else {
                split(paragraph, &ranges)
            }
        }
    }
}

/// Sort ranges and merge the ones that overlap or touch.
///
/// Ranges that are empty or do not fit in `len` are dropped.
pub fn merge_ranges(ranges: impl IntoIterator<Item = TextRange>, len: usize) -> Vec<TextRange> {
    let mut ranges: Vec<TextRange> = ranges.into_iter().filter(|r| r.fits(len)).collect();
    ranges.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<TextRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Split around sorted, disjoint, in-bounds ranges
fn split<'a>(paragraph: &'a Paragraph, ranges: &[TextRange]) -> StyledRun<'a> {
    let mut segments = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0;

    for range in ranges {
        if range.start > cursor {
            segments.push(Segment {
                text: paragraph.slice(cursor, range.start),
                highlighted: false,
            });
        }
        segments.push(Segment {
            text: paragraph.slice(range.start, range.end),
            highlighted: true,
        });
        cursor = range.end;
    }

    if cursor < paragraph.len() {
        segments.push(Segment {
            text: paragraph.slice(cursor, paragraph.len()),
            highlighted: false,
        });
    }

    StyledRun { segments }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "The Enlightenment was a rebellion";

    fn highlight(start: usize, end: usize) -> Highlight {
        Highlight {
            text: String::new(),
            start,
            end,
            paragraph_index: 0,
        }
    }

    #[test]
    fn test_render_three_segments() {
        let p = Paragraph::new(TEXT);
        let run = render_range(&p, Some(TextRange::new(4, 17)));
        assert_eq!(run.texts(), vec!["The ", "Enlightenment", " was a rebellion"]);
        let flags: Vec<bool> = run.segments.iter().map(|s| s.highlighted).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_render_from_start_offset_zero() {
        let p = Paragraph::new(TEXT);
        let run = render_range(&p, Some(TextRange::new(0, 3)));
        assert_eq!(run.texts(), vec!["The", " Enlightenment was a rebellion"]);
        assert!(run.segments[0].highlighted);
    }

    #[test]
    fn test_render_plain_for_invalid_ranges() {
        let p = Paragraph::new(TEXT);
        for range in [
            None,
            Some(TextRange::new(5, 5)),
            Some(TextRange::new(9, 2)),
            Some(TextRange::new(4, 400)),
        ] {
            let run = render_range(&p, range);
            assert_eq!(run, StyledRun::plain(TEXT));
        }
    }

    #[test]
    fn test_render_first_ignores_later_highlights() {
        let p = Paragraph::new(TEXT);
        let a = highlight(24, 33);
        let b = highlight(0, 3);
        let run = render_paragraph(&p, &[&a, &b], HighlightPolicy::RenderFirst);
        assert_eq!(run.highlighted_texts(), vec!["rebellion"]);
    }

    #[test]
    fn test_render_all_draws_every_highlight() {
        let p = Paragraph::new(TEXT);
        let a = highlight(24, 33);
        let b = highlight(0, 3);
        let run = render_paragraph(&p, &[&a, &b], HighlightPolicy::RenderAll);
        assert_eq!(run.highlighted_texts(), vec!["The", "rebellion"]);
        assert_eq!(run.text(), TEXT);
    }

    #[test]
    fn test_render_all_merges_overlaps() {
        let p = Paragraph::new(TEXT);
        let a = highlight(4, 10);
        let b = highlight(8, 17);
        let run = render_paragraph(&p, &[&a, &b], HighlightPolicy::RenderAll);
        assert_eq!(run.texts(), vec!["The ", "Enlightenment", " was a rebellion"]);
    }

    #[test]
    fn test_merge_ranges_touching_and_invalid() {
        let merged = merge_ranges(
            [
                TextRange::new(5, 8),
                TextRange::new(0, 5),
                TextRange::new(7, 7),
                TextRange::new(20, 30),
            ],
            10,
        );
        assert_eq!(merged, vec![TextRange::new(0, 8)]);
    }

    #[test]
    fn test_render_all_without_highlights_is_plain() {
        let p = Paragraph::new(TEXT);
        let run = render_paragraph(&p, &[], HighlightPolicy::RenderAll);
        assert!(!run.has_highlight());
        assert_eq!(run.text(), TEXT);
    }
}

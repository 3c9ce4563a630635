//! Selection tracking
//!
//! Interprets raw `(paragraph, start, end)` selection-change events coming
//! from the host text surface. A selection is always scoped to a single
//! paragraph; an event for another paragraph simply replaces the current
//! selection.

use crate::Result;
use reading_model::{Document, Selection};
use serde::{Deserialize, Serialize};

/// A raw selection-change event from the text surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    pub paragraph_index: usize,
    pub start: usize,
    pub end: usize,
}

/// What a selection-change event means for the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerUpdate {
    /// A non-empty range: this becomes the current selection
    Select(Selection),
    /// The range collapsed while a selection existed: clear it now
    Clear,
    /// Collapsed range with nothing selected
    Ignore,
}

/// Turns selection-change events into selection updates
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionTracker;

impl SelectionTracker {
    pub fn new() -> Self {
        Self
    }

    /// Interpret one event against the current selection.
    ///
    /// Offsets are ordered and clamped to the paragraph, so stale layout
    /// events never read out of range. An unknown paragraph is an error.
    pub fn apply(
        &self,
        document: &Document,
        current: Option<&Selection>,
        change: SelectionChange,
    ) -> Result<TrackerUpdate> {
        let paragraph = document.paragraph(change.paragraph_index)?;

        let update = match Selection::new_clamped(
            change.paragraph_index,
            paragraph,
            change.start,
            change.end,
        ) {
            Some(selection) => {
                if let Some(current) = current {
                    if current.paragraph_index != selection.paragraph_index {
                        tracing::debug!(
                            from = current.paragraph_index,
                            to = selection.paragraph_index,
                            "selection moved to another paragraph"
                        );
                    }
                }
                TrackerUpdate::Select(selection)
            }
            None if current.is_some() => TrackerUpdate::Clear,
            None => TrackerUpdate::Ignore,
        };

        Ok(update)
    }
}

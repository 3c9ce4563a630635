//! Selection menu positioning
//!
//! Estimates where a selection sits inside its paragraph box and places the
//! action menu next to it. The line estimate uses an average number of
//! characters per line instead of real glyph layout, so the result is only
//! approximately aligned with the text. Hosts with text measurement can pass
//! a tighter anchor box (the selected line itself) for exact placement.

use crate::{MenuSettings, Rect, Viewport};
use reading_model::{Paragraph, TextRange};
use serde::{Deserialize, Serialize};

/// Which side of the selection the menu ended up on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Above,
    Below,
}

/// Top-left corner of the action menu, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MenuPosition {
    pub x: f64,
    pub y: f64,
    pub placement: Placement,
}

/// Computes menu positions from a paragraph's on-screen box
#[derive(Debug, Clone)]
pub struct MenuPositioner {
    settings: MenuSettings,
}

impl MenuPositioner {
    pub fn new(settings: MenuSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    /// Position the menu for `range` inside `paragraph`, whose container
    /// occupies `anchor` on screen.
    ///
    /// The menu prefers to sit above the selected line and flips below it
    /// when that would cross the safe area at the top. The result always
    /// satisfies `margin <= x <= viewport.width - width - margin` and the
    /// same bound vertically, unless the viewport is smaller than the menu,
    /// in which case the menu is pinned to the top-left margin.
    pub fn position(
        &self,
        anchor: Rect,
        paragraph: &Paragraph,
        range: TextRange,
        viewport: Viewport,
    ) -> MenuPosition {
        let s = &self.settings;
        let chars_per_line = s.chars_per_line.max(1) as f64;
        let len = paragraph.len().max(1) as f64;

        let midpoint = range.clamped(paragraph.len()).midpoint().min(len);
        let total_lines = (len / chars_per_line).ceil().max(1.0);
        let line = (midpoint / chars_per_line).floor().min(total_lines - 1.0);
        let line_top = anchor.y + line * s.line_height;

        // The last line is usually shorter than the average
        let line_chars = if line == total_lines - 1.0 {
            len - line * chars_per_line
        } else {
            chars_per_line
        };
        let column = midpoint - line * chars_per_line;
        let fraction = (column / line_chars.max(1.0)).clamp(0.0, 1.0);
        let center_x = anchor.x + anchor.width * fraction;

        let above = line_top - s.gap - s.height;
        let (y, placement) = if above < s.safe_top {
            (line_top + s.line_height + s.gap, Placement::Below)
        } else {
            (above, Placement::Above)
        };

        let position = MenuPosition {
            x: Viewport::clamp_axis(center_x - s.width / 2.0, s.width, viewport.width, s.margin),
            y: Viewport::clamp_axis(y, s.height, viewport.height, s.margin),
            placement,
        };
        tracing::trace!(?position, line, "menu positioned");
        position
    }
}

impl Default for MenuPositioner {
    fn default() -> Self {
        Self::new(MenuSettings::default())
    }
}

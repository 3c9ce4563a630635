//! Selection action menu
//!
//! The menu is drawn over a full-screen transparent layer: a tap on one of
//! its cells runs that action, a tap anywhere outside dismisses the
//! selection.

use crate::{MenuPosition, MenuSettings, Point, Rect};
use serde::{Deserialize, Serialize};

/// Inset between the menu border and its action cells
const MENU_PADDING: f64 = 4.0;

/// Actions offered for the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionAction {
    /// Ask the assistant to explain the passage
    Explain,
    /// Add the selection to the highlight store
    Highlight,
    /// Save the passage to notes
    Save,
    /// Copy the selected text to the clipboard
    Copy,
}

impl SelectionAction {
    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            SelectionAction::Explain => "Explain",
            SelectionAction::Highlight => "Highlight",
            SelectionAction::Save => "Save",
            SelectionAction::Copy => "Copy",
        }
    }
}

/// Result of hit-testing a tap against the menu overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuHit {
    Action(SelectionAction),
    /// Inside the menu but between cells
    Inside,
    /// On the transparent layer around the menu
    Outside,
}

/// A positioned action menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMenu {
    pub position: MenuPosition,
    pub width: f64,
    pub height: f64,
    pub actions: Vec<SelectionAction>,
}

impl ActionMenu {
    pub fn new(position: MenuPosition, settings: &MenuSettings, offer_copy: bool) -> Self {
        let mut actions = vec![
            SelectionAction::Explain,
            SelectionAction::Highlight,
            SelectionAction::Save,
        ];
        if offer_copy {
            actions.push(SelectionAction::Copy);
        }

        Self {
            position,
            width: settings.width,
            height: settings.height,
            actions,
        }
    }

    pub fn offers(&self, action: SelectionAction) -> bool {
        self.actions.contains(&action)
    }

    /// Outer bounds of the menu
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Bounds of the cell for the action at `index`.
    /// Cells share the padded width equally.
    pub fn item_bounds(&self, index: usize) -> Option<Rect> {
        if index >= self.actions.len() {
            return None;
        }
        let inner_width = (self.width - 2.0 * MENU_PADDING).max(0.0);
        let cell_width = inner_width / self.actions.len() as f64;
        Some(Rect::new(
            self.position.x + MENU_PADDING + cell_width * index as f64,
            self.position.y,
            cell_width,
            self.height,
        ))
    }

    pub fn hit_test(&self, point: Point) -> MenuHit {
        if !self.bounds().contains(point) {
            return MenuHit::Outside;
        }

        (0..self.actions.len())
            .find(|&i| self.item_bounds(i).is_some_and(|r| r.contains(point)))
            .map(|i| MenuHit::Action(self.actions[i]))
            .unwrap_or(MenuHit::Inside)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Placement;

    fn menu(offer_copy: bool) -> ActionMenu {
        let position = MenuPosition {
            x: 40.0,
            y: 200.0,
            placement: Placement::Above,
        };
        ActionMenu::new(position, &MenuSettings::default(), offer_copy)
    }

    #[test]
    fn test_actions_with_and_without_copy() {
        assert_eq!(menu(true).actions.len(), 4);
        assert!(menu(true).offers(SelectionAction::Copy));
        assert_eq!(menu(false).actions.len(), 3);
        assert!(!menu(false).offers(SelectionAction::Copy));
    }

    #[test]
    fn test_labels() {
        assert_eq!(SelectionAction::Explain.label(), "Explain");
        assert_eq!(SelectionAction::Copy.label(), "Copy");
    }

    #[test]
    fn test_hit_test_cells() {
        let menu = menu(true);
        // Four cells of 73px starting at x = 44
        assert_eq!(
            menu.hit_test(Point::new(50.0, 220.0)),
            MenuHit::Action(SelectionAction::Explain)
        );
        assert_eq!(
            menu.hit_test(Point::new(44.0 + 73.0 + 10.0, 220.0)),
            MenuHit::Action(SelectionAction::Highlight)
        );
        assert_eq!(
            menu.hit_test(Point::new(330.0, 220.0)),
            MenuHit::Action(SelectionAction::Copy)
        );
    }

    #[test]
    fn test_hit_test_padding_and_outside() {
        let menu = menu(true);
        assert_eq!(menu.hit_test(Point::new(41.0, 220.0)), MenuHit::Inside);
        assert_eq!(menu.hit_test(Point::new(20.0, 220.0)), MenuHit::Outside);
        assert_eq!(menu.hit_test(Point::new(100.0, 600.0)), MenuHit::Outside);
    }

    #[test]
    fn test_item_bounds_out_of_range() {
        assert!(menu(false).item_bounds(3).is_none());
    }
}

//! Events fed into the reading surface and effects it asks the host to run

use crate::{Rect, SelectionAction};
use serde::{Deserialize, Serialize};

/// An input event from the host UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// A short press on the reading content
    Tap,
    /// A raw touch ended; classified as a tap by duration and movement
    TouchRelease { duration_ms: u64, distance: f64 },
    /// A long press on a paragraph starts native selection there
    LongPress { paragraph_index: usize },
    /// The selection range of a paragraph changed
    SelectionChange {
        paragraph_index: usize,
        start: usize,
        end: usize,
        /// On-screen box of the paragraph container
        anchor: Rect,
    },
    /// The content scrolled
    Scroll,
    /// A tap on the selection menu overlay
    MenuTap { x: f64, y: f64 },
    /// An action invoked directly, e.g. from a keyboard shortcut
    Action { action: SelectionAction },
    /// Explicit dismissal of the current selection
    Dismiss,
    /// The chat button on the toolbar
    OpenChat,
    CloseChat,
    /// The chat sheet was dragged down by `dy` and released
    ChatDrag { dy: f64 },
    SendChat { text: String },
}

/// Work the host has to carry out after an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Enable native selection handles on this paragraph only
    ActivateSelection { paragraph_index: usize },
    /// Drop native selection state on this paragraph
    ReleaseSelection { paragraph_index: usize },
    /// Hide any platform selection context menu
    SuppressNativeMenu,
    /// The user asked for an explanation of the text
    Explain { text: String },
    /// The user saved the text to notes
    Save { text: String },
    /// A dismissible, non-fatal message for the user
    Notice { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let json = r#"{ "type": "selection_change", "paragraph_index": 5, "start": 4, "end": 17,
                        "anchor": { "x": 16.0, "y": 200.0, "width": 358.0, "height": 72.0 } }"#;
        let event: SurfaceEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            SurfaceEvent::SelectionChange {
                paragraph_index: 5,
                start: 4,
                end: 17,
                anchor: Rect::new(16.0, 200.0, 358.0, 72.0),
            }
        );

        let action: SurfaceEvent =
            serde_json::from_str(r#"{ "type": "action", "action": "highlight" }"#).unwrap();
        assert_eq!(
            action,
            SurfaceEvent::Action {
                action: SelectionAction::Highlight
            }
        );
    }

    #[test]
    fn test_effect_json_shape() {
        let effect = Effect::Save {
            text: "authority".to_string(),
        };
        let json = serde_json::to_string(&effect).unwrap();
        assert_eq!(json, r#"{"type":"save","text":"authority"}"#);
    }
}

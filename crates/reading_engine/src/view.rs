//! Snapshot of what the host should draw

use crate::{ActionMenu, ChatMessage, Clipboard, ReadingSurface, Responder, SurfacePhase, SurfaceState};
use reading_model::{Highlight, Selection, StyledRun};
use serde::Serialize;
use std::collections::BTreeMap;

/// Visibility flags of the reading screen overlays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UiFlags {
    pub toolbar_visible: bool,
    pub chat_sheet_visible: bool,
    pub selection_menu_visible: bool,
    pub text_selected: bool,
}

impl UiFlags {
    /// At most one of toolbar, chat sheet and menu is ever set
    pub fn from_state(state: &SurfaceState) -> Self {
        Self {
            toolbar_visible: matches!(state, SurfaceState::ToolbarVisible),
            chat_sheet_visible: matches!(state, SurfaceState::ChatOpen { .. }),
            selection_menu_visible: matches!(state, SurfaceState::MenuVisible { .. }),
            text_selected: state.selection().is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatView<'a> {
    pub title: String,
    pub messages: &'a [ChatMessage],
    pub thinking: bool,
}

/// Everything the reading screen shows at one instant
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceView<'a> {
    pub phase: SurfacePhase,
    pub flags: UiFlags,
    pub title: &'a str,
    pub selection: Option<&'a Selection>,
    pub menu: Option<&'a ActionMenu>,
    pub copy_confirmation: bool,
    pub scrolling: bool,
    pub chat: Option<ChatView<'a>>,
    pub paragraphs: Vec<StyledRun<'a>>,
    /// Saved highlights keyed by paragraph, for the highlights list
    pub highlights: BTreeMap<usize, Vec<&'a Highlight>>,
}

impl<C: Clipboard, R: Responder> ReadingSurface<C, R> {
    pub fn view(&self) -> SurfaceView<'_> {
        let state = self.state();
        SurfaceView {
            phase: state.phase(),
            flags: UiFlags::from_state(state),
            title: &self.document().title,
            selection: state.selection(),
            menu: state.menu(),
            copy_confirmation: self.copy_confirmation_visible(),
            scrolling: self.is_scrolling(),
            chat: state.chat().map(|chat| ChatView {
                title: chat.title(),
                messages: chat.messages(),
                thinking: chat.is_thinking(),
            }),
            paragraphs: self.render_paragraphs(),
            highlights: self.highlights().grouped_by_paragraph(),
        }
    }
}

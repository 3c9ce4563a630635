//! Reading surface orchestrator
//!
//! Owns the screen state of the reading view as a single tagged union, so
//! the toolbar, the selection menu and the chat sheet can never be visible
//! at the same time. Every transition happens synchronously inside
//! `handle`/`tick`; the only deferred work is the set of single-shot timers
//! in [`Timers`].
//!
//! Canonical selection policy: a collapsed range clears the selection
//! immediately, while showing the menu is debounced. A new range while the
//! menu is up hides it again until the selection settles.

use crate::{
    ActionMenu, CannedResponder, ChatSession, Clipboard, Effect, MemoryClipboard, MenuHit,
    MenuPosition, MenuPositioner, Point, ReaderSettings, Rect, Responder, Result,
    SelectionAction, SelectionChange, SelectionTracker, SurfaceEvent, TimerKind, Timers,
    TrackerUpdate, Viewport,
};
use reading_model::{render_paragraph, Document, HighlightStore, Selection, StyledRun};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A selection waiting for the debounce timer before its menu shows
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMenu {
    pub selection: Selection,
    pub position: MenuPosition,
}

/// Screen state of the reading view
#[derive(Debug, Clone)]
pub enum SurfaceState {
    /// Only the text is visible
    Idle,
    /// The reading toolbar is showing
    ToolbarVisible,
    /// Native selection is active on a paragraph; the menu is not shown yet
    Selecting {
        paragraph_index: usize,
        pending: Option<PendingMenu>,
    },
    /// The action menu is showing for a selection
    MenuVisible {
        selection: Selection,
        menu: ActionMenu,
    },
    /// The chat sheet covers the content
    ChatOpen { chat: ChatSession },
}

/// The variant of [`SurfaceState`] without its data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfacePhase {
    Idle,
    ToolbarVisible,
    Selecting,
    MenuVisible,
    ChatOpen,
}

impl SurfaceState {
    pub fn phase(&self) -> SurfacePhase {
        match self {
            SurfaceState::Idle => SurfacePhase::Idle,
            SurfaceState::ToolbarVisible => SurfacePhase::ToolbarVisible,
            SurfaceState::Selecting { .. } => SurfacePhase::Selecting,
            SurfaceState::MenuVisible { .. } => SurfacePhase::MenuVisible,
            SurfaceState::ChatOpen { .. } => SurfacePhase::ChatOpen,
        }
    }

    /// The current selection, if any
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            SurfaceState::Selecting {
                pending: Some(pending),
                ..
            } => Some(&pending.selection),
            SurfaceState::MenuVisible { selection, .. } => Some(selection),
            _ => None,
        }
    }

    pub fn menu(&self) -> Option<&ActionMenu> {
        match self {
            SurfaceState::MenuVisible { menu, .. } => Some(menu),
            _ => None,
        }
    }

    pub fn chat(&self) -> Option<&ChatSession> {
        match self {
            SurfaceState::ChatOpen { chat } => Some(chat),
            _ => None,
        }
    }

    /// Paragraph with native selection enabled
    pub fn selected_paragraph(&self) -> Option<usize> {
        match self {
            SurfaceState::Selecting {
                paragraph_index, ..
            } => Some(*paragraph_index),
            SurfaceState::MenuVisible { selection, .. } => Some(selection.paragraph_index),
            _ => None,
        }
    }
}

/// The interactive reading view: selection, highlights, toolbar and chat
pub struct ReadingSurface<C = MemoryClipboard, R = CannedResponder> {
    document: Document,
    settings: ReaderSettings,
    viewport: Viewport,
    clipboard: C,
    responder: R,
    tracker: SelectionTracker,
    positioner: MenuPositioner,
    highlights: HighlightStore,
    timers: Timers,
    state: SurfaceState,
    /// Latest host timestamp seen
    now: Duration,
    scrolling: bool,
    copy_confirmation: bool,
    /// Set by a long press so the touch release that ends it is not a tap
    long_press_latched: bool,
}

impl<C: Clipboard, R: Responder> ReadingSurface<C, R> {
    pub fn new(
        document: Document,
        settings: ReaderSettings,
        viewport: Viewport,
        clipboard: C,
        responder: R,
    ) -> Self {
        let positioner = MenuPositioner::new(settings.menu.clone());
        Self {
            document,
            settings,
            viewport,
            clipboard,
            responder,
            tracker: SelectionTracker::new(),
            positioner,
            highlights: HighlightStore::new(),
            timers: Timers::new(),
            state: SurfaceState::Idle,
            now: Duration::ZERO,
            scrolling: false,
            copy_confirmation: false,
            long_press_latched: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn phase(&self) -> SurfacePhase {
        self.state.phase()
    }

    pub fn highlights(&self) -> &HighlightStore {
        &self.highlights
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Whether the "Copied" confirmation is showing
    pub fn copy_confirmation_visible(&self) -> bool {
        self.copy_confirmation
    }

    /// When the host should call [`tick`](Self::tick) next
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Update the screen size, e.g. on rotation
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Render one paragraph with its highlights
    pub fn render_paragraph(&self, index: usize) -> Result<StyledRun<'_>> {
        let paragraph = self.document.paragraph(index)?;
        let highlights = self.highlights.query_by_paragraph(index);
        Ok(render_paragraph(
            paragraph,
            &highlights,
            self.settings.highlights.policy,
        ))
    }

    /// Render every paragraph with its highlights
    pub fn render_paragraphs(&self) -> Vec<StyledRun<'_>> {
        self.document
            .paragraphs()
            .iter()
            .enumerate()
            .map(|(index, paragraph)| {
                render_paragraph(
                    paragraph,
                    &self.highlights.query_by_paragraph(index),
                    self.settings.highlights.policy,
                )
            })
            .collect()
    }

    /// Fire timers due at `now`, then apply `event`.
    ///
    /// Fails only when the event names a paragraph that does not exist. The
    /// event is then dropped, though timers due at `now` have still fired.
    pub fn handle(&mut self, event: SurfaceEvent, now: Duration) -> Result<Vec<Effect>> {
        let mut effects = Vec::new();
        self.advance(now);
        tracing::trace!(?event, phase = ?self.state.phase(), "surface event");

        match event {
            SurfaceEvent::Tap => self.on_tap(&mut effects),
            SurfaceEvent::TouchRelease {
                duration_ms,
                distance,
            } => {
                if std::mem::take(&mut self.long_press_latched) {
                    tracing::trace!("touch release after long press ignored");
                } else if self.settings.gestures.is_tap(duration_ms, distance) {
                    self.on_tap(&mut effects);
                }
            }
            SurfaceEvent::LongPress { paragraph_index } => {
                self.on_long_press(paragraph_index, &mut effects)?
            }
            SurfaceEvent::SelectionChange {
                paragraph_index,
                start,
                end,
                anchor,
            } => self.on_selection_change(
                SelectionChange {
                    paragraph_index,
                    start,
                    end,
                },
                anchor,
                &mut effects,
            )?,
            SurfaceEvent::Scroll => self.on_scroll(&mut effects),
            SurfaceEvent::MenuTap { x, y } => self.on_menu_tap(Point::new(x, y), &mut effects),
            SurfaceEvent::Action { action } => self.on_action(action, &mut effects),
            SurfaceEvent::Dismiss => self.clear_selection(&mut effects),
            SurfaceEvent::OpenChat => self.open_chat(),
            SurfaceEvent::CloseChat => self.close_chat(),
            SurfaceEvent::ChatDrag { dy } => {
                if self.settings.gestures.closes_chat(dy) {
                    self.close_chat();
                }
            }
            SurfaceEvent::SendChat { text } => self.send_chat(&text),
        }

        Ok(effects)
    }

    /// Fire timers due at `now`. Returns the timers that fired.
    pub fn tick(&mut self, now: Duration) -> Vec<TimerKind> {
        self.advance(now)
    }

    /// Cancel all pending timers and return to idle, e.g. when the screen
    /// is closed. A pending chat reply is dropped.
    pub fn teardown(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.clear_selection(&mut effects);
        self.timers.clear();
        self.state = SurfaceState::Idle;
        self.scrolling = false;
        self.copy_confirmation = false;
        self.long_press_latched = false;
        tracing::debug!("reading surface torn down");
        effects
    }

    fn advance(&mut self, now: Duration) -> Vec<TimerKind> {
        if now < self.now {
            tracing::warn!(?now, last = ?self.now, "host clock went backwards, ignoring");
        } else {
            self.now = now;
        }

        let fired = self.timers.take_expired(self.now);
        for &kind in &fired {
            self.fire(kind);
        }
        fired
    }

    fn fire(&mut self, kind: TimerKind) {
        tracing::trace!(?kind, "timer fired");
        match kind {
            TimerKind::SelectionMenu => {
                let state = std::mem::replace(&mut self.state, SurfaceState::Idle);
                self.state = match state {
                    SurfaceState::Selecting {
                        pending: Some(pending),
                        ..
                    } => {
                        tracing::debug!(
                            paragraph = pending.selection.paragraph_index,
                            "selection menu shown"
                        );
                        SurfaceState::MenuVisible {
                            menu: ActionMenu::new(
                                pending.position,
                                &self.settings.menu,
                                self.settings.highlights.offer_copy,
                            ),
                            selection: pending.selection,
                        }
                    }
                    other => other,
                };
            }
            TimerKind::ToolbarHide => {
                if matches!(self.state, SurfaceState::ToolbarVisible) && !self.scrolling {
                    tracing::debug!("toolbar auto-hidden");
                    self.state = SurfaceState::Idle;
                }
            }
            TimerKind::CopyConfirmation => self.copy_confirmation = false,
            TimerKind::ScrollSettle => {
                tracing::trace!("scrolling settled");
                self.scrolling = false;
            }
            TimerKind::ChatResponse => {
                if let SurfaceState::ChatOpen { chat } = &mut self.state {
                    if let Some(reply) = chat.receive(&mut self.responder) {
                        tracing::debug!(id = %reply.id, "assistant replied");
                    }
                }
            }
        }
    }

    fn on_tap(&mut self, effects: &mut Vec<Effect>) {
        if std::mem::take(&mut self.long_press_latched) {
            return;
        }

        match self.state.phase() {
            SurfacePhase::Selecting | SurfacePhase::MenuVisible => self.clear_selection(effects),
            SurfacePhase::ChatOpen => {}
            _ if self.scrolling => tracing::trace!("tap ignored while scrolling"),
            SurfacePhase::Idle => self.show_toolbar(),
            SurfacePhase::ToolbarVisible => self.hide_toolbar(),
        }
    }

    fn on_long_press(&mut self, paragraph_index: usize, effects: &mut Vec<Effect>) -> Result<()> {
        self.document.paragraph(paragraph_index)?;
        if self.state.phase() == SurfacePhase::ChatOpen {
            tracing::debug!("long press ignored while chat is open");
            return Ok(());
        }

        self.release_other_paragraph(paragraph_index, effects);
        self.timers.cancel(TimerKind::SelectionMenu);
        self.timers.cancel(TimerKind::ToolbarHide);
        self.state = SurfaceState::Selecting {
            paragraph_index,
            pending: None,
        };
        self.long_press_latched = true;

        effects.push(Effect::ActivateSelection { paragraph_index });
        self.suppress_native_menu(effects);
        tracing::debug!(paragraph_index, "native selection activated");
        Ok(())
    }

    fn on_selection_change(
        &mut self,
        change: SelectionChange,
        anchor: Rect,
        effects: &mut Vec<Effect>,
    ) -> Result<()> {
        if self.state.phase() == SurfacePhase::ChatOpen {
            tracing::trace!("selection change ignored while chat is open");
            return Ok(());
        }

        match self
            .tracker
            .apply(&self.document, self.state.selection(), change)?
        {
            TrackerUpdate::Select(selection) => {
                self.release_other_paragraph(selection.paragraph_index, effects);

                let paragraph = self.document.paragraph(selection.paragraph_index)?;
                let position =
                    self.positioner
                        .position(anchor, paragraph, selection.range(), self.viewport);

                self.timers.cancel(TimerKind::ToolbarHide);
                self.timers.schedule(
                    TimerKind::SelectionMenu,
                    self.now,
                    self.settings.timing.selection_menu_delay(),
                );
                tracing::debug!(
                    paragraph = selection.paragraph_index,
                    start = selection.start,
                    end = selection.end,
                    "selection changed"
                );

                self.state = SurfaceState::Selecting {
                    paragraph_index: selection.paragraph_index,
                    pending: Some(PendingMenu {
                        selection,
                        position,
                    }),
                };
                self.suppress_native_menu(effects);
            }
            TrackerUpdate::Clear => self.clear_selection(effects),
            TrackerUpdate::Ignore => {}
        }
        Ok(())
    }

    fn on_scroll(&mut self, effects: &mut Vec<Effect>) {
        if self.state.phase() == SurfacePhase::ChatOpen {
            return;
        }

        if !self.scrolling {
            tracing::trace!("scrolling started");
            self.scrolling = true;
        }
        match self.state.phase() {
            SurfacePhase::ToolbarVisible => self.hide_toolbar(),
            SurfacePhase::Selecting | SurfacePhase::MenuVisible => self.clear_selection(effects),
            _ => {}
        }
        self.timers.schedule(
            TimerKind::ScrollSettle,
            self.now,
            self.settings.timing.scroll_settle(),
        );
    }

    fn on_menu_tap(&mut self, point: Point, effects: &mut Vec<Effect>) {
        let hit = match self.state.menu() {
            Some(menu) => menu.hit_test(point),
            None => {
                tracing::trace!("menu tap without a visible menu");
                return;
            }
        };

        match hit {
            MenuHit::Action(action) => self.on_action(action, effects),
            MenuHit::Outside => self.clear_selection(effects),
            MenuHit::Inside => {}
        }
    }

    fn on_action(&mut self, action: SelectionAction, effects: &mut Vec<Effect>) {
        let Some(selection) = self.state.selection().cloned() else {
            tracing::debug!(?action, "action ignored without a selection");
            return;
        };
        if action == SelectionAction::Copy && !self.settings.highlights.offer_copy {
            tracing::debug!("copy is not offered");
            self.clear_selection(effects);
            return;
        }

        self.perform(action, selection, effects);
        self.clear_selection(effects);
    }

    fn perform(&mut self, action: SelectionAction, selection: Selection, effects: &mut Vec<Effect>) {
        match action {
            SelectionAction::Explain => {
                tracing::info!(text = %selection.text, "explain requested");
                effects.push(Effect::Explain {
                    text: selection.text,
                });
            }
            SelectionAction::Save => {
                tracing::info!(text = %selection.text, "save requested");
                effects.push(Effect::Save {
                    text: selection.text,
                });
            }
            SelectionAction::Highlight => {
                let current = self
                    .document
                    .paragraph(selection.paragraph_index)
                    .is_ok_and(|paragraph| selection.matches(paragraph));
                if current {
                    tracing::info!(
                        paragraph = selection.paragraph_index,
                        start = selection.start,
                        end = selection.end,
                        "highlight added"
                    );
                    self.highlights.append(selection.into());
                } else {
                    tracing::warn!("stale selection, highlight skipped");
                }
            }
            SelectionAction::Copy => match self.clipboard.set_text(&selection.text) {
                Ok(()) => {
                    tracing::debug!("selection copied");
                    self.copy_confirmation = true;
                    self.timers.schedule(
                        TimerKind::CopyConfirmation,
                        self.now,
                        self.settings.timing.copy_confirmation(),
                    );
                }
                Err(e) => {
                    tracing::warn!("Failed to copy selection: {}", e);
                    effects.push(Effect::Notice {
                        message: "Couldn't copy the selection".to_string(),
                    });
                }
            },
        }
    }

    fn clear_selection(&mut self, effects: &mut Vec<Effect>) {
        let Some(paragraph_index) = self.state.selected_paragraph() else {
            return;
        };

        self.state = SurfaceState::Idle;
        self.timers.cancel(TimerKind::SelectionMenu);
        effects.push(Effect::ReleaseSelection { paragraph_index });
        tracing::debug!(paragraph_index, "selection cleared");
    }

    /// Release native selection on a paragraph other than `paragraph_index`
    fn release_other_paragraph(&mut self, paragraph_index: usize, effects: &mut Vec<Effect>) {
        if let Some(previous) = self.state.selected_paragraph() {
            if previous != paragraph_index {
                effects.push(Effect::ReleaseSelection {
                    paragraph_index: previous,
                });
            }
        }
    }

    fn suppress_native_menu(&self, effects: &mut Vec<Effect>) {
        if self.settings.surface.custom_selection_overlay {
            effects.push(Effect::SuppressNativeMenu);
        }
    }

    fn show_toolbar(&mut self) {
        self.state = SurfaceState::ToolbarVisible;
        self.timers.schedule(
            TimerKind::ToolbarHide,
            self.now,
            self.settings.timing.toolbar_hide_delay(),
        );
    }

    fn hide_toolbar(&mut self) {
        if matches!(self.state, SurfaceState::ToolbarVisible) {
            self.state = SurfaceState::Idle;
        }
        self.timers.cancel(TimerKind::ToolbarHide);
    }

    fn open_chat(&mut self) {
        if self.state.phase() != SurfacePhase::ToolbarVisible {
            tracing::debug!(phase = ?self.state.phase(), "chat can only open from the toolbar");
            return;
        }

        self.timers.cancel(TimerKind::ToolbarHide);
        self.state = SurfaceState::ChatOpen {
            chat: ChatSession::new(self.document.title.clone()),
        };
        tracing::debug!("chat opened");
    }

    fn close_chat(&mut self) {
        if self.state.phase() != SurfacePhase::ChatOpen {
            return;
        }

        self.timers.cancel(TimerKind::ChatResponse);
        self.state = SurfaceState::Idle;
        tracing::debug!("chat closed");
    }

    fn send_chat(&mut self, text: &str) {
        let SurfaceState::ChatOpen { chat } = &mut self.state else {
            tracing::debug!("chat message ignored, chat is closed");
            return;
        };

        if chat.send(text).is_some() {
            self.timers.schedule(
                TimerKind::ChatResponse,
                self.now,
                self.settings.timing.chat_response_delay(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> ReadingSurface {
        ReadingSurface::new(
            Document::new("Book", ["The Enlightenment was a rebellion"]),
            ReaderSettings::default(),
            Viewport::default(),
            MemoryClipboard::default(),
            CannedResponder,
        )
    }

    fn select(surface: &mut ReadingSurface, start: usize, end: usize, now: u64) -> Vec<Effect> {
        let event = SurfaceEvent::SelectionChange {
            paragraph_index: 0,
            start,
            end,
            anchor: Rect::new(16.0, 200.0, 358.0, 48.0),
        };
        surface.handle(event, Duration::from_millis(now)).unwrap()
    }

    #[test]
    fn test_selection_suppresses_native_menu() {
        let mut surface = surface();
        let effects = select(&mut surface, 4, 17, 0);
        assert_eq!(effects, vec![Effect::SuppressNativeMenu]);
        assert_eq!(surface.next_deadline(), Some(Duration::from_millis(500)));
        assert_eq!(surface.state().selection().unwrap().text, "Enlightenment");
    }

    #[test]
    fn test_native_overlay_setting() {
        let mut settings = ReaderSettings::default();
        settings.surface.custom_selection_overlay = false;
        let mut surface: ReadingSurface = ReadingSurface::new(
            Document::new("Book", ["Some text"]),
            settings,
            Viewport::default(),
            MemoryClipboard::default(),
            CannedResponder,
        );
        let effects = surface
            .handle(SurfaceEvent::LongPress { paragraph_index: 0 }, Duration::ZERO)
            .unwrap();
        assert_eq!(effects, vec![Effect::ActivateSelection { paragraph_index: 0 }]);
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut surface = surface();
        select(&mut surface, 4, 17, 1_000);
        surface.tick(Duration::from_millis(200));
        assert_eq!(surface.now(), Duration::from_millis(1_000));
        assert_eq!(surface.phase(), SurfacePhase::Selecting);

        assert_eq!(
            surface.tick(Duration::from_millis(1_500)),
            vec![TimerKind::SelectionMenu]
        );
        assert_eq!(surface.phase(), SurfacePhase::MenuVisible);
    }

    #[test]
    fn test_collapsed_range_without_selection_is_ignored() {
        let mut surface = surface();
        let effects = select(&mut surface, 3, 3, 0);
        assert!(effects.is_empty());
        assert_eq!(surface.phase(), SurfacePhase::Idle);
    }

    #[test]
    fn test_menu_tap_inside_padding_keeps_menu() {
        let mut surface = surface();
        select(&mut surface, 4, 17, 0);
        surface.tick(Duration::from_millis(500));

        let bounds = surface.state().menu().unwrap().bounds();
        let effects = surface
            .handle(
                SurfaceEvent::MenuTap {
                    x: bounds.x + 1.0,
                    y: bounds.y + 1.0,
                },
                Duration::from_millis(600),
            )
            .unwrap();
        assert!(effects.is_empty());
        assert_eq!(surface.phase(), SurfacePhase::MenuVisible);
    }
}

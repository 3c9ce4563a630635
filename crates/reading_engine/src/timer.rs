//! Cancellable single-shot timers driven by the host clock
//!
//! The reading surface never sleeps. Each kind of deferred callback has at
//! most one pending deadline; scheduling it again replaces the old one, and
//! the host reports time passing through `take_expired`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// The deferred callbacks of the reading surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Show the action menu once the selection stops changing
    SelectionMenu,
    /// Hide the toolbar after inactivity
    ToolbarHide,
    /// Hide the "Copied" confirmation
    CopyConfirmation,
    /// Mark scrolling as finished
    ScrollSettle,
    /// Deliver the assistant's reply
    ChatResponse,
}

/// Pending deadlines, at most one per kind
#[derive(Debug, Clone, Default)]
pub struct Timers {
    deadlines: BTreeMap<TimerKind, Duration>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire `delay` after `now`, replacing any pending
    /// deadline of the same kind.
    pub fn schedule(&mut self, kind: TimerKind, now: Duration, delay: Duration) {
        let deadline = now + delay;
        if self.deadlines.insert(kind, deadline).is_some() {
            tracing::trace!(?kind, ?deadline, "timer rescheduled");
        } else {
            tracing::trace!(?kind, ?deadline, "timer scheduled");
        }
    }

    /// Cancel a pending timer. Returns whether one was pending.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.deadlines.remove(&kind).is_some()
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.deadlines.contains_key(&kind)
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<Duration> {
        self.deadlines.get(&kind).copied()
    }

    /// The earliest pending deadline, for hosts that sleep until it
    pub fn next_deadline(&self) -> Option<Duration> {
        self.deadlines.values().min().copied()
    }

    /// Remove and return every timer due at `now`, earliest first
    pub fn take_expired(&mut self, now: Duration) -> Vec<TimerKind> {
        let mut expired: Vec<(Duration, TimerKind)> = self
            .deadlines
            .iter()
            .filter(|(_, &deadline)| deadline <= now)
            .map(|(&kind, &deadline)| (deadline, kind))
            .collect();
        expired.sort();

        for (_, kind) in &expired {
            self.deadlines.remove(kind);
        }
        expired.into_iter().map(|(_, kind)| kind).collect()
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_schedule_and_expire() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::SelectionMenu, ms(0), ms(500));
        assert!(timers.take_expired(ms(499)).is_empty());
        assert_eq!(timers.take_expired(ms(500)), vec![TimerKind::SelectionMenu]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::SelectionMenu, ms(0), ms(500));
        timers.schedule(TimerKind::SelectionMenu, ms(300), ms(500));
        assert_eq!(timers.deadline(TimerKind::SelectionMenu), Some(ms(800)));
        assert!(timers.take_expired(ms(600)).is_empty());
    }

    #[test]
    fn test_expired_in_deadline_order() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::ToolbarHide, ms(0), ms(3000));
        timers.schedule(TimerKind::CopyConfirmation, ms(0), ms(2000));
        timers.schedule(TimerKind::ScrollSettle, ms(0), ms(500));
        assert_eq!(timers.next_deadline(), Some(ms(500)));

        let fired = timers.take_expired(ms(5000));
        assert_eq!(
            fired,
            vec![
                TimerKind::ScrollSettle,
                TimerKind::CopyConfirmation,
                TimerKind::ToolbarHide
            ]
        );
    }

    #[test]
    fn test_cancel_and_clear() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::ChatResponse, ms(0), ms(2000));
        assert!(timers.cancel(TimerKind::ChatResponse));
        assert!(!timers.cancel(TimerKind::ChatResponse));

        timers.schedule(TimerKind::ToolbarHide, ms(0), ms(1));
        timers.clear();
        assert!(!timers.is_pending(TimerKind::ToolbarHide));
    }
}

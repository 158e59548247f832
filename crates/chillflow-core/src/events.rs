use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::{Phase, PhaseCategory};

/// Every state change of the cycle engine produces an Event.
/// Statistics, UI and audio layers subscribe to them through an [`EventSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The phase changed, including pause and resume.
    PhaseChanged { previous: Phase, current: Phase },
    /// A focus phase ran down to zero on its own.
    /// Emitted before the `PhaseChanged` that leaves the focus phase.
    FocusCompleted {
        focus_index: u32,
        duration_secs: u64,
        completed_at: DateTime<Utc>,
    },
}

impl Event {
    /// Coarse category of the phase that was left, for `PhaseChanged`.
    pub fn previous_category(&self) -> Option<PhaseCategory> {
        match self {
            Event::PhaseChanged { previous, .. } => Some(previous.category()),
            Event::FocusCompleted { .. } => None,
        }
    }
}

/// Receiver of engine events, injected at engine construction.
pub trait EventSink {
    fn emit(&mut self, event: &Event);
}

/// Discards every event.
impl EventSink for () {
    fn emit(&mut self, _event: &Event) {}
}

/// Collects events in order; handy for tests and replay.
impl EventSink for Vec<Event> {
    fn emit(&mut self, event: &Event) {
        self.push(event.clone());
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &Event) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: &Event) {
        (**self).emit(event);
    }
}

/// Fan-out: both sinks see every event, left first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &Event) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

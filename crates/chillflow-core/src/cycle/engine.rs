//! Cycle engine implementation.
//!
//! The cycle engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick(now)`
//! periodically and for passing the current time into every command.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Focus(1) -> Rest(1) -> Focus(2) -> ... -> Focus(max) -> LongRest -> Idle
//!            \___________ any running phase <-> Paused(phase) ___________/
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CycleEngine::new(CycleConfig::default(), sink);
//! engine.start(Utc::now());
//! // In a loop:
//! engine.tick(Utc::now()); // emits FocusCompleted / PhaseChanged into the sink
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::CycleConfig;
use super::phase::{ActivePhase, Phase};
use crate::error::CycleError;
use crate::events::{Event, EventSink};

/// Serializable engine state.
///
/// Remaining time is derived: while running it is recomputed from
/// `started_at` on every tick, never decremented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleState {
    phase: Phase,
    /// Focus session the cycle is on; 0 only while idle.
    focus_index: u32,
    remaining_secs: u64,
    /// When the running countdown began or was last resumed.
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
    /// Countdown length measured from `started_at`: the phase duration on
    /// entry, the saved remainder after a resume.
    #[serde(default)]
    baseline_secs: u64,
    /// Snapshot taken on pause.
    #[serde(default)]
    saved_remaining_secs: Option<u64>,
}

impl CycleState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn focus_index(&self) -> u32 {
        self.focus_index
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Whether this state could have been produced under `config`.
    pub fn is_consistent_with(&self, config: &CycleConfig) -> bool {
        let expected_index = |active: ActivePhase| match active {
            ActivePhase::Focus(n) | ActivePhase::Rest(n) => n,
            ActivePhase::LongRest => config.max_sessions(),
        };

        match self.phase {
            Phase::Idle => {
                self.focus_index == 0
                    && self.remaining_secs == 0
                    && self.started_at.is_none()
                    && self.saved_remaining_secs.is_none()
            }
            Phase::Paused(active) => {
                let total = config.duration_of(active);
                config.admits(active)
                    && self.focus_index == expected_index(active)
                    && self.started_at.is_none()
                    && self
                        .saved_remaining_secs
                        .is_some_and(|saved| saved <= total && saved == self.remaining_secs)
            }
            running => {
                let Some(active) = running.running() else {
                    return false;
                };
                let total = config.duration_of(active);
                config.admits(active)
                    && self.focus_index == expected_index(active)
                    && self.started_at.is_some()
                    && self.saved_remaining_secs.is_none()
                    && (1..=total).contains(&self.baseline_secs)
                    && self.remaining_secs <= self.baseline_secs
            }
        }
    }
}

/// Point-in-time view of the engine for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleSnapshot {
    pub phase: Phase,
    pub focus_index: u32,
    pub max_sessions: u32,
    pub remaining_secs: u64,
    pub total_secs: u64,
    /// `"n/max"` while in a focus or short rest phase.
    pub session_label: Option<String>,
    pub progress: f64,
}

/// Core cycle engine.
///
/// Owns the phase state machine and reports every change to the injected
/// sink. Commands outside their valid phase are ignored, with the single
/// exception of [`CycleEngine::skip`] while paused.
#[derive(Debug)]
pub struct CycleEngine<S = ()> {
    config: CycleConfig,
    state: CycleState,
    sink: S,
}

impl<S: EventSink> CycleEngine<S> {
    /// Create an idle engine.
    pub fn new(config: CycleConfig, sink: S) -> Self {
        Self {
            config,
            state: CycleState::default(),
            sink,
        }
    }

    /// Rebuild an engine from a saved [`CycleState`].
    ///
    /// A state that does not fit `config` (for example after the session
    /// count was lowered) is dropped and the engine starts idle.
    pub fn restore(config: CycleConfig, state: CycleState, sink: S) -> Self {
        let state = if state.is_consistent_with(&config) {
            state
        } else {
            warn!(phase = %state.phase, "discarding cycle state that does not match the current config");
            CycleState::default()
        };
        Self {
            config,
            state,
            sink,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn focus_index(&self) -> u32 {
        self.state.focus_index
    }

    /// Remaining seconds as of the last tick (or the pause snapshot).
    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    /// Full duration of the current phase; 0 while idle.
    pub fn total_secs(&self) -> u64 {
        match self.state.phase {
            Phase::Paused(active) => self.config.duration_of(active),
            phase => phase
                .running()
                .map(|active| self.config.duration_of(active))
                .unwrap_or(0),
        }
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.state.remaining_secs as f64 / total as f64)
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_parts(self) -> (CycleState, S) {
        (self.state, self.sink)
    }

    pub fn snapshot(&self) -> CycleSnapshot {
        let session_label = match self.state.phase.base() {
            Phase::Focus(n) | Phase::Rest(n) => {
                Some(format!("{n}/{}", self.config.max_sessions()))
            }
            _ => None,
        };
        CycleSnapshot {
            phase: self.state.phase,
            focus_index: self.state.focus_index,
            max_sessions: self.config.max_sessions(),
            remaining_secs: self.state.remaining_secs,
            total_secs: self.total_secs(),
            session_label,
            progress: self.progress(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a cycle with the first focus session. Ignored unless idle.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if !self.state.phase.is_idle() {
            return;
        }
        self.enter(ActivePhase::Focus(1), now);
    }

    /// Recompute the remaining time from the wall clock and apply any
    /// natural completions that are due.
    ///
    /// A late tick fast-forwards: each successor phase starts at the instant
    /// its predecessor ran out, so several phases may complete in one call.
    /// Returns the number of phases that completed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> u32 {
        let mut completed = 0;
        while let (Some(active), Some(started_at)) =
            (self.state.phase.running(), self.state.started_at)
        {
            let baseline = self.state.baseline_secs;
            let remaining = baseline.saturating_sub(elapsed_secs(started_at, now));
            self.state.remaining_secs = remaining;
            if remaining > 0 {
                break;
            }
            let boundary = offset_by(started_at, baseline).unwrap_or(now);
            self.complete(active, boundary);
            completed += 1;
        }
        completed
    }

    /// Freeze the running countdown. Ignored unless a phase is running.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        // Flush elapsed time first.
        self.tick(now);
        let (Some(active), Some(started_at)) =
            (self.state.phase.running(), self.state.started_at)
        else {
            return;
        };

        let saved = self
            .state
            .baseline_secs
            .saturating_sub(elapsed_secs(started_at, now));
        let previous = self.state.phase;
        self.state.phase = Phase::Paused(active);
        self.state.saved_remaining_secs = Some(saved);
        self.state.remaining_secs = saved;
        self.state.started_at = None;
        self.phase_changed(previous);
    }

    /// Continue a paused countdown from its saved remainder. Ignored unless paused.
    pub fn resume(&mut self, now: DateTime<Utc>) {
        let Some(active) = self.state.phase.paused() else {
            return;
        };

        let saved = self
            .state
            .saved_remaining_secs
            .take()
            .unwrap_or(self.state.remaining_secs);
        let previous = self.state.phase;
        self.state.phase = active.into();
        self.state.baseline_secs = saved;
        self.state.remaining_secs = saved;
        self.state.started_at = Some(now);
        self.phase_changed(previous);
    }

    /// Move to the next phase without waiting for the countdown.
    ///
    /// Skipping never records a focus session. If the running phase had
    /// already run out, its natural completion is applied instead and
    /// nothing further is skipped.
    ///
    /// # Errors
    /// Returns [`CycleError::InvalidOperation`] while paused; resume or
    /// reset first.
    pub fn skip(&mut self, now: DateTime<Utc>) -> Result<(), CycleError> {
        if self.state.phase.is_paused() {
            return Err(CycleError::InvalidOperation {
                operation: "skip",
                phase: self.state.phase,
            });
        }
        if self.tick(now) > 0 {
            return Ok(());
        }
        if let Some(active) = self.state.phase.running() {
            debug!(phase = %active, "skipping phase");
            self.advance(active, now);
        }
        Ok(())
    }

    /// Return to idle from any phase.
    pub fn reset(&mut self) {
        let previous = self.state.phase;
        self.state = CycleState::default();
        if !previous.is_idle() {
            self.phase_changed(previous);
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self, active: ActivePhase, at: DateTime<Utc>) {
        if let ActivePhase::Focus(n) = active {
            let duration_secs = self.config.focus_duration_secs();
            info!(focus_index = n, duration_secs, "focus session completed");
            self.sink.emit(&Event::FocusCompleted {
                focus_index: n,
                duration_secs,
                completed_at: at,
            });
        }
        self.advance(active, at);
    }

    fn successor(&self, active: ActivePhase) -> Option<ActivePhase> {
        let max = self.config.max_sessions();
        match active {
            ActivePhase::Focus(n) if n < max => Some(ActivePhase::Rest(n)),
            ActivePhase::Focus(_) => Some(ActivePhase::LongRest),
            ActivePhase::Rest(n) if n < max => Some(ActivePhase::Focus(n + 1)),
            ActivePhase::Rest(_) => Some(ActivePhase::LongRest),
            ActivePhase::LongRest => None,
        }
    }

    fn advance(&mut self, active: ActivePhase, at: DateTime<Utc>) {
        match self.successor(active) {
            Some(next) => self.enter(next, at),
            None => self.reset(),
        }
    }

    fn enter(&mut self, next: ActivePhase, at: DateTime<Utc>) {
        let previous = self.state.phase;
        let duration = self.config.duration_of(next);
        self.state = CycleState {
            phase: next.into(),
            focus_index: match next {
                ActivePhase::Focus(n) | ActivePhase::Rest(n) => n,
                ActivePhase::LongRest => self.config.max_sessions(),
            },
            remaining_secs: duration,
            started_at: Some(at),
            baseline_secs: duration,
            saved_remaining_secs: None,
        };
        self.phase_changed(previous);
    }

    fn phase_changed(&mut self, previous: Phase) {
        let current = self.state.phase;
        debug!(%previous, %current, "phase changed");
        self.sink.emit(&Event::PhaseChanged { previous, current });
    }
}

/// Whole seconds from `start` to `now`; a clock that moved backwards counts as zero.
fn elapsed_secs(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - start).num_seconds()).unwrap_or(0)
}

fn offset_by(start: DateTime<Utc>, secs: u64) -> Option<DateTime<Utc>> {
    let delta = TimeDelta::try_seconds(i64::try_from(secs).ok()?)?;
    start.checked_add_signed(delta)
}

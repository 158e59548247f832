use serde::Serialize;

use super::phase::ActivePhase;
use crate::error::ConfigError;

pub const DEFAULT_FOCUS_SECS: u64 = 25 * 60;
pub const DEFAULT_REST_SECS: u64 = 5 * 60;
pub const DEFAULT_LONG_REST_SECS: u64 = 30 * 60;
pub const DEFAULT_MAX_SESSIONS: u32 = 3;

/// Durations and session count for one focus cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleConfig {
    focus_duration_secs: u64,
    rest_duration_secs: u64,
    long_rest_duration_secs: u64,
    max_sessions: u32,
}

impl CycleConfig {
    /// Build a validated config.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if any duration is zero or
    /// `max_sessions` is zero.
    pub fn new(
        focus_duration_secs: u64,
        rest_duration_secs: u64,
        long_rest_duration_secs: u64,
        max_sessions: u32,
    ) -> Result<Self, ConfigError> {
        let checks = [
            ("focus_duration_secs", focus_duration_secs),
            ("rest_duration_secs", rest_duration_secs),
            ("long_rest_duration_secs", long_rest_duration_secs),
            ("max_sessions", u64::from(max_sessions)),
        ];
        for (key, value) in checks {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be greater than zero".into(),
                });
            }
        }
        Ok(Self {
            focus_duration_secs,
            rest_duration_secs,
            long_rest_duration_secs,
            max_sessions,
        })
    }

    pub fn focus_duration_secs(&self) -> u64 {
        self.focus_duration_secs
    }

    pub fn rest_duration_secs(&self) -> u64 {
        self.rest_duration_secs
    }

    pub fn long_rest_duration_secs(&self) -> u64 {
        self.long_rest_duration_secs
    }

    pub fn max_sessions(&self) -> u32 {
        self.max_sessions
    }

    /// Full countdown length of a phase.
    pub fn duration_of(&self, phase: ActivePhase) -> u64 {
        match phase {
            ActivePhase::Focus(_) => self.focus_duration_secs,
            ActivePhase::Rest(_) => self.rest_duration_secs,
            ActivePhase::LongRest => self.long_rest_duration_secs,
        }
    }

    /// Whether `phase` can occur under this config.
    pub fn admits(&self, phase: ActivePhase) -> bool {
        match phase {
            ActivePhase::Focus(n) => (1..=self.max_sessions).contains(&n),
            ActivePhase::Rest(n) => n >= 1 && n < self.max_sessions,
            ActivePhase::LongRest => true,
        }
    }

    /// Total wall-clock length of an uninterrupted cycle, in seconds.
    pub fn cycle_duration_secs(&self) -> u64 {
        let sessions = u64::from(self.max_sessions);
        self.focus_duration_secs
            .saturating_mul(sessions)
            .saturating_add(self.rest_duration_secs.saturating_mul(sessions - 1))
            .saturating_add(self.long_rest_duration_secs)
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            focus_duration_secs: DEFAULT_FOCUS_SECS,
            rest_duration_secs: DEFAULT_REST_SECS,
            long_rest_duration_secs: DEFAULT_LONG_REST_SECS,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

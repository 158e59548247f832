use std::fmt;

use serde::{Deserialize, Serialize};

/// A phase that has a countdown attached to it.
///
/// This is the payload of [`Phase::Paused`]; keeping it a separate type
/// makes a nested pause (or a paused idle) unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivePhase {
    /// Focus session `n`, 1-based.
    Focus(u32),
    /// Short rest following focus session `n`.
    Rest(u32),
    LongRest,
}

/// Current stage of the focus cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Focus(u32),
    Rest(u32),
    LongRest,
    Paused(ActivePhase),
}

/// Coarse classification of a phase, with `Paused` unwrapped to its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseCategory {
    Idle,
    Focus,
    Rest,
    LongRest,
}

impl ActivePhase {
    pub fn category(self) -> PhaseCategory {
        match self {
            ActivePhase::Focus(_) => PhaseCategory::Focus,
            ActivePhase::Rest(_) => PhaseCategory::Rest,
            ActivePhase::LongRest => PhaseCategory::LongRest,
        }
    }

    pub fn is_focus(self) -> bool {
        matches!(self, ActivePhase::Focus(_))
    }
}

impl From<ActivePhase> for Phase {
    fn from(active: ActivePhase) -> Self {
        match active {
            ActivePhase::Focus(n) => Phase::Focus(n),
            ActivePhase::Rest(n) => Phase::Rest(n),
            ActivePhase::LongRest => Phase::LongRest,
        }
    }
}

impl Phase {
    /// The phase with any pause wrapper removed.
    pub fn base(self) -> Phase {
        match self {
            Phase::Paused(active) => active.into(),
            other => other,
        }
    }

    /// The counting-down phase, if the countdown is currently running.
    pub fn running(self) -> Option<ActivePhase> {
        match self {
            Phase::Focus(n) => Some(ActivePhase::Focus(n)),
            Phase::Rest(n) => Some(ActivePhase::Rest(n)),
            Phase::LongRest => Some(ActivePhase::LongRest),
            Phase::Idle | Phase::Paused(_) => None,
        }
    }

    /// The phase wrapped by `Paused`, if any.
    pub fn paused(self) -> Option<ActivePhase> {
        match self {
            Phase::Paused(active) => Some(active),
            _ => None,
        }
    }

    pub fn category(self) -> PhaseCategory {
        match self {
            Phase::Idle => PhaseCategory::Idle,
            Phase::Focus(_) => PhaseCategory::Focus,
            Phase::Rest(_) => PhaseCategory::Rest,
            Phase::LongRest => PhaseCategory::LongRest,
            Phase::Paused(active) => active.category(),
        }
    }

    pub fn is_idle(self) -> bool {
        self == Phase::Idle
    }

    pub fn is_paused(self) -> bool {
        matches!(self, Phase::Paused(_))
    }
}

impl fmt::Display for ActivePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivePhase::Focus(n) => write!(f, "focus #{n}"),
            ActivePhase::Rest(n) => write!(f, "rest after #{n}"),
            ActivePhase::LongRest => f.write_str("long rest"),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => f.write_str("idle"),
            Phase::Paused(active) => write!(f, "paused ({active})"),
            other => match other.running() {
                Some(active) => write!(f, "{active}"),
                None => Ok(()),
            },
        }
    }
}

impl fmt::Display for PhaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PhaseCategory::Idle => "idle",
            PhaseCategory::Focus => "focus",
            PhaseCategory::Rest => "rest",
            PhaseCategory::LongRest => "long rest",
        })
    }
}

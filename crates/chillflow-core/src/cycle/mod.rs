mod config;
mod engine;
mod phase;

pub use config::{
    CycleConfig, DEFAULT_FOCUS_SECS, DEFAULT_LONG_REST_SECS, DEFAULT_MAX_SESSIONS,
    DEFAULT_REST_SECS,
};
pub use engine::{CycleEngine, CycleSnapshot, CycleState};
pub use phase::{ActivePhase, Phase, PhaseCategory};

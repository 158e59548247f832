//! # ChillFlow Core Library
//!
//! This library provides the core business logic for the ChillFlow focus timer.
//! It follows a CLI-first philosophy: every operation is available through the
//! standalone `chillflow` binary, and any GUI is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Cycle Engine**: A wall-clock-based state machine that requires the caller
//!   to periodically invoke `tick()` for progress updates
//! - **Statistics**: Completed focus sessions folded into a weekly
//!   time-of-day heatmap
//! - **Storage**: Opaque key-value persistence (SQLite or in-memory) and
//!   TOML-based configuration
//! - **Audio policy**: Which background-audio cue follows each phase change
//!
//! ## Key Components
//!
//! - [`CycleEngine`]: Core cycle state machine
//! - [`StatsAggregator`]: Weekly and per-slot focus statistics
//! - [`SessionLog`]: Persistent focus log fed by engine events
//! - [`Config`]: Application configuration management

pub mod audio;
pub mod cycle;
pub mod error;
pub mod events;
pub mod stats;
pub mod storage;

pub use audio::{AudioCue, AudioCueSink};
pub use cycle::{ActivePhase, CycleConfig, CycleEngine, CycleSnapshot, CycleState, Phase, PhaseCategory};
pub use error::{ConfigError, CoreError, CycleError, StatsError, StoreError};
pub use events::{Event, EventSink};
pub use stats::{FocusRecord, StatsAggregator, WeeklyHeatmap, WeeklyStats};
pub use storage::{Config, Database, KeyValueStore, MemoryStore, SessionLog};

//! Statistics module for ChillFlow
//!
//! This module keeps the log of completed focus sessions and turns it into
//! weekly time-of-day heatmaps and per-slot totals.

mod aggregator;
mod heatmap;
mod record;

pub use aggregator::{week_start_for, StatsAggregator};
pub use heatmap::{
    slot_hours, slot_label, WeeklyHeatmap, WeeklyStats, DAYS_PER_WEEK, DAY_LABELS, HOURS_PER_SLOT,
    MIN_INTENSITY_BASELINE_SECS, SLOTS_PER_DAY,
};
pub use record::FocusRecord;

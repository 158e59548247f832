//! Weekly focus heatmap.
//!
//! A week is split into 7 days (Monday first) by 3 eight-hour slots of the
//! day. Each cell holds the summed focus seconds that landed in it.

use std::ops::RangeInclusive;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;
pub const SLOTS_PER_DAY: usize = 3;
pub const HOURS_PER_SLOT: u8 = 8;

/// Colour intensity never normalizes against less than one hour.
pub const MIN_INTENSITY_BASELINE_SECS: u64 = 3600;

pub const DAY_LABELS: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Hours of day covered by `slot`.
pub fn slot_hours(slot: usize) -> Option<RangeInclusive<u8>> {
    if slot >= SLOTS_PER_DAY {
        return None;
    }
    let start = slot as u8 * HOURS_PER_SLOT;
    Some(start..=start + HOURS_PER_SLOT - 1)
}

/// Display name for a slot, e.g. `"08:00-15:59"`.
pub fn slot_label(slot: usize) -> Option<&'static str> {
    match slot {
        0 => Some("00:00-07:59"),
        1 => Some("08:00-15:59"),
        2 => Some("16:00-23:59"),
        _ => None,
    }
}

/// 7x3 matrix of focus seconds, indexed `[day][slot]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHeatmap {
    cells: [[u64; SLOTS_PER_DAY]; DAYS_PER_WEEK],
}

impl WeeklyHeatmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, day: usize, slot: usize, secs: u64) {
        if let Some(cell) = self.cells.get_mut(day).and_then(|row| row.get_mut(slot)) {
            *cell = cell.saturating_add(secs);
        }
    }

    /// Cell value; 0 outside the grid.
    pub fn get(&self, day: usize, slot: usize) -> u64 {
        self.cells
            .get(day)
            .and_then(|row| row.get(slot))
            .copied()
            .unwrap_or(0)
    }

    pub fn cells(&self) -> &[[u64; SLOTS_PER_DAY]; DAYS_PER_WEEK] {
        &self.cells
    }

    pub fn day_total(&self, day: usize) -> u64 {
        self.cells.get(day).map(|row| row.iter().sum()).unwrap_or(0)
    }

    pub fn slot_total(&self, slot: usize) -> u64 {
        self.cells
            .iter()
            .filter_map(|row| row.get(slot))
            .sum()
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    pub fn max_cell(&self) -> u64 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|&v| v == 0)
    }

    /// Relative heat of a cell (0.0-1.0) against the busiest cell, with
    /// [`MIN_INTENSITY_BASELINE_SECS`] as the floor of the scale.
    pub fn intensity(&self, day: usize, slot: usize) -> f64 {
        let scale = self.max_cell().max(MIN_INTENSITY_BASELINE_SECS);
        (self.get(day, slot) as f64 / scale as f64).min(1.0)
    }
}

/// Aggregate for one Monday-aligned week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// e.g. `"Mar 2 - Mar 8"`
    pub label: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_secs: u64,
    pub heatmap: WeeklyHeatmap,
}

impl WeeklyStats {
    /// Calendar date of heatmap row `day`.
    pub fn day_date(&self, day: usize) -> Option<NaiveDate> {
        if day >= DAYS_PER_WEEK {
            return None;
        }
        self.week_start.checked_add_days(Days::new(day as u64))
    }
}

//! Append-only log of completed focus sessions and the queries over it.
//!
//! Calendar questions ("which day", "which week") are answered in the time
//! zone of the `DateTime` handed to each query. Production callers pass
//! `Local`; tests pin a fixed offset.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::heatmap::{slot_hours, WeeklyHeatmap, WeeklyStats, DAYS_PER_WEEK};
use super::record::FocusRecord;
use crate::error::StatsError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsAggregator {
    records: Vec<FocusRecord>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<FocusRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FocusRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of every recorded session.
    pub fn total_secs(&self) -> u64 {
        self.records.iter().map(FocusRecord::duration_secs).sum()
    }

    /// Append a session completed at `now`.
    pub fn record<Tz: TimeZone>(&mut self, duration_secs: u64, now: &DateTime<Tz>) -> &FocusRecord {
        self.records.push(FocusRecord::new(duration_secs, now));
        &self.records[self.records.len() - 1]
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Aggregate the Monday-aligned week `week_offset` weeks away from `now`.
    ///
    /// # Errors
    /// Returns [`StatsError::WeekOutOfRange`] when the target week cannot be
    /// represented as a calendar date.
    pub fn weekly_stats<Tz: TimeZone>(
        &self,
        week_offset: i64,
        now: &DateTime<Tz>,
    ) -> Result<WeeklyStats, StatsError> {
        let out_of_range = || StatsError::WeekOutOfRange { week_offset };
        let week_start = week_start_for(now.date_naive(), week_offset).ok_or_else(out_of_range)?;
        let week_end = week_start
            .checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1))
            .ok_or_else(out_of_range)?;

        let tz = now.timezone();
        let mut heatmap = WeeklyHeatmap::new();
        let mut total_secs: u64 = 0;

        for record in &self.records {
            let date = record.local_date(&tz);
            if date < week_start || date > week_end {
                continue;
            }
            total_secs = total_secs.saturating_add(record.duration_secs());
            let day = (date - week_start).num_days() as usize;
            if let Some(slot) = record.slot() {
                heatmap.add(day, slot, record.duration_secs());
            }
        }

        Ok(WeeklyStats {
            label: format!("{} - {}", week_start.format("%b %-d"), week_end.format("%b %-d")),
            week_start,
            week_end,
            total_secs,
            heatmap,
        })
    }

    /// Focus seconds on `date`'s calendar day whose hour falls in `slot`.
    /// Slots outside `0..=2` sum to zero.
    pub fn hourly_stats<Tz: TimeZone>(&self, date: &DateTime<Tz>, slot: usize) -> u64 {
        let Some(hours) = slot_hours(slot) else {
            return 0;
        };
        let tz = date.timezone();
        let day = date.date_naive();
        self.records
            .iter()
            .filter(|r| r.local_date(&tz) == day && hours.contains(&r.hour_of_day()))
            .map(FocusRecord::duration_secs)
            .sum()
    }
}

/// Monday of the week `week_offset` weeks from `date`.
///
/// Computed by weekday arithmetic so the result is Monday whatever a
/// locale considers the first day of the week.
pub fn week_start_for(date: NaiveDate, week_offset: i64) -> Option<NaiveDate> {
    let shift = Days::new(week_offset.unsigned_abs().checked_mul(7)?);
    let shifted = if week_offset >= 0 {
        date.checked_add_days(shift)?
    } else {
        date.checked_sub_days(shift)?
    };
    let back = u64::from(shifted.weekday().num_days_from_monday());
    shifted.checked_sub_days(Days::new(back))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Weekday};

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        tz().with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_is_monday_for_every_weekday() {
        // 2026-03-02 is a Monday.
        for offset in 0..7 {
            let date = ymd(2026, 3, 2) + Days::new(offset);
            assert_eq!(week_start_for(date, 0), Some(ymd(2026, 3, 2)), "{date}");
        }
        assert_eq!(week_start_for(ymd(2026, 3, 8), 0).unwrap().weekday(), Weekday::Mon);
    }

    #[test]
    fn week_offsets_move_whole_weeks() {
        let wed = ymd(2026, 3, 4);
        assert_eq!(week_start_for(wed, -1), Some(ymd(2026, 2, 23)));
        assert_eq!(week_start_for(wed, 1), Some(ymd(2026, 3, 9)));
        assert_eq!(week_start_for(wed, i64::MAX), None);
    }

    #[test]
    fn empty_week_is_all_zero() {
        let stats = StatsAggregator::new();
        let week = stats.weekly_stats(0, &local(2026, 3, 4, 12, 0)).unwrap();
        assert_eq!(week.total_secs, 0);
        assert!(week.heatmap.is_empty());
        assert_eq!(week.label, "Mar 2 - Mar 8");
    }

    #[test]
    fn monday_morning_session_lands_in_first_cell() {
        let mut stats = StatsAggregator::new();
        stats.record(1500, &local(2026, 3, 2, 6, 0));

        let week = stats.weekly_stats(0, &local(2026, 3, 4, 12, 0)).unwrap();
        assert_eq!(week.total_secs, 1500);
        assert_eq!(week.heatmap.get(0, 0), 1500);
        assert_eq!(week.heatmap.total(), 1500);
    }

    #[test]
    fn late_sunday_session_counts_toward_the_week() {
        let mut stats = StatsAggregator::new();
        stats.record(1500, &local(2026, 3, 8, 23, 30));
        stats.record(1500, &local(2026, 3, 9, 0, 10));

        let week = stats.weekly_stats(0, &local(2026, 3, 2, 8, 0)).unwrap();
        assert_eq!(week.total_secs, 1500);
        assert_eq!(week.heatmap.get(6, 2), 1500);

        let next = stats.weekly_stats(1, &local(2026, 3, 2, 8, 0)).unwrap();
        assert_eq!(next.heatmap.get(0, 0), 1500);
    }

    #[test]
    fn previous_week_offset() {
        let mut stats = StatsAggregator::new();
        stats.record(1500, &local(2026, 2, 25, 15, 0));
        stats.record(1500, &local(2026, 3, 3, 10, 0));

        let week = stats.weekly_stats(-1, &local(2026, 3, 4, 12, 0)).unwrap();
        assert_eq!(week.label, "Feb 23 - Mar 1");
        assert_eq!(week.total_secs, 1500);
        assert_eq!(week.heatmap.get(2, 1), 1500);
    }

    #[test]
    fn label_spans_year_boundary() {
        let stats = StatsAggregator::new();
        let week = stats.weekly_stats(0, &local(2026, 1, 1, 9, 0)).unwrap();
        assert_eq!(week.week_start, ymd(2025, 12, 29));
        assert_eq!(week.label, "Dec 29 - Jan 4");
    }

    #[test]
    fn unrepresentable_week_is_an_error() {
        let stats = StatsAggregator::new();
        let err = stats
            .weekly_stats(i64::MIN, &local(2026, 1, 1, 9, 0))
            .unwrap_err();
        assert_eq!(err, StatsError::WeekOutOfRange { week_offset: i64::MIN });
    }

    #[test]
    fn stored_hour_is_not_recomputed() {
        let mut stats = StatsAggregator::new();
        // Recorded at 07:30 in UTC+8; queried from UTC where it is 23:30 the day before.
        stats.record(1500, &local(2026, 3, 3, 7, 30));

        let utc_now = chrono::Utc.with_ymd_and_hms(2026, 3, 4, 0, 0, 0).unwrap();
        let week = stats.weekly_stats(0, &utc_now).unwrap();
        // Day follows the query zone (Monday in UTC), slot the stored hour.
        assert_eq!(week.heatmap.get(0, 0), 1500);
    }

    #[test]
    fn hourly_stats_filters_day_and_slot() {
        let mut stats = StatsAggregator::new();
        stats.record(1500, &local(2026, 3, 2, 8, 0));
        stats.record(1500, &local(2026, 3, 2, 15, 59));
        stats.record(1500, &local(2026, 3, 2, 16, 0));
        stats.record(1500, &local(2026, 3, 3, 9, 0));

        let monday = local(2026, 3, 2, 0, 0);
        assert_eq!(stats.hourly_stats(&monday, 0), 0);
        assert_eq!(stats.hourly_stats(&monday, 1), 3000);
        assert_eq!(stats.hourly_stats(&monday, 2), 1500);
        assert_eq!(stats.hourly_stats(&monday, 3), 0);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut stats = StatsAggregator::new();
        stats.record(60, &local(2026, 3, 2, 8, 0));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.total_secs(), 60);
        stats.clear();
        assert!(stats.is_empty());
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut stats = StatsAggregator::new();
        stats.record(60, &local(2026, 3, 2, 8, 0));
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.is_array());
        let back: StatsAggregator = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }
}

//! Terminal formatting for countdowns, totals and the weekly heatmap.

use std::fmt::Write;

use chillflow_core::stats::{slot_label, DAYS_PER_WEEK, DAY_LABELS, SLOTS_PER_DAY};
use chillflow_core::WeeklyStats;

const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Zero-padded `MM:SS`. Minutes keep counting past 59.
pub fn format_countdown(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `"Xh Ym"`, or `"Ym"` under an hour.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

fn shade(intensity: f64) -> char {
    if intensity <= 0.0 {
        return SHADES[0];
    }
    let level = (intensity * 4.0).ceil() as usize;
    SHADES[level.clamp(1, 4)]
}

pub fn render_heatmap(stats: &WeeklyStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  (total {})",
        stats.label,
        format_duration(stats.total_secs)
    );

    out.push_str("     ");
    for slot in 0..SLOTS_PER_DAY {
        let _ = write!(out, " {:>13}", slot_label(slot).unwrap_or_default());
    }
    out.push('\n');

    for day in 0..DAYS_PER_WEEK {
        let _ = write!(out, "{:<5}", DAY_LABELS[day]);
        for slot in 0..SLOTS_PER_DAY {
            let secs = stats.heatmap.get(day, slot);
            let text = if secs == 0 {
                "-".to_string()
            } else {
                format_duration(secs)
            };
            let _ = write!(
                out,
                " {}{:>12}",
                shade(stats.heatmap.intensity(day, slot)),
                text
            );
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chillflow_core::StatsAggregator;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn countdown_is_zero_padded() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(1500), "25:00");
        assert_eq!(format_countdown(65), "01:05");
        assert_eq!(format_countdown(6000), "100:00");
    }

    #[test]
    fn duration_drops_zero_hours() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(1500), "25m");
        assert_eq!(format_duration(3600), "1h 0m");
        assert_eq!(format_duration(4500), "1h 15m");
    }

    #[test]
    fn shade_levels() {
        assert_eq!(shade(0.0), ' ');
        assert_eq!(shade(0.1), '░');
        assert_eq!(shade(1.0), '█');
    }

    #[test]
    fn heatmap_has_a_row_per_day() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let mut agg = StatsAggregator::new();
        agg.record(1500, &tz.with_ymd_and_hms(2026, 3, 3, 10, 0, 0).unwrap());
        let stats = agg
            .weekly_stats(0, &tz.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap())
            .unwrap();

        let text = render_heatmap(&stats);
        assert!(text.starts_with("Mar 2 - Mar 8  (total 25m)"));
        assert_eq!(text.lines().count(), 2 + DAYS_PER_WEEK);
        let tuesday = text.lines().nth(3).unwrap();
        assert!(tuesday.starts_with(DAY_LABELS[1]));
        assert!(tuesday.contains("25m"));
    }
}

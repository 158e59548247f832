use chillflow_core::stats::slot_label;
use chrono::{Local, NaiveDate, TimeZone};
use clap::Subcommand;

use super::open_log;
use crate::display::{format_duration, render_heatmap};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Weekly time-of-day heatmap
    Week {
        /// Weeks relative to the current one (-1 = last week)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Focus time in one 8-hour slot of a day
    Slot {
        /// Day to query (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// 0 = 00:00-07:59, 1 = 08:00-15:59, 2 = 16:00-23:59
        #[arg(long)]
        slot: usize,
    },
    /// Delete every recorded focus session
    Clear,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut log = open_log()?;

    match action {
        StatsAction::Week { offset, json } => {
            let stats = log.stats().weekly_stats(offset, &Local::now())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", render_heatmap(&stats));
            }
        }
        StatsAction::Slot { date, slot } => {
            let noon = date.and_hms_opt(12, 0, 0).ok_or("invalid date")?;
            let day = Local
                .from_local_datetime(&noon)
                .earliest()
                .ok_or("date does not exist in the local time zone")?;
            let total_secs = log.stats().hourly_stats(&day, slot);
            let out = serde_json::json!({
                "date": date,
                "slot": slot,
                "label": slot_label(slot),
                "total_secs": total_secs,
                "total": format_duration(total_secs),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Clear => {
            log.clear()?;
            println!("focus log cleared");
        }
    }
    Ok(())
}

use std::io::Write;
use std::time::Duration;

use chillflow_core::{AudioCue, AudioCueSink, Config, CycleConfig, CycleEngine, Event, EventSink};
use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tracing::info;

use super::open_log;
use crate::display::{format_countdown, format_duration};

/// Prints phase changes and completed sessions on their own line.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: &Event) {
        match event {
            Event::PhaseChanged { previous, current } => {
                println!("\r{:<40}", format!("{previous} -> {current}"));
            }
            Event::FocusCompleted {
                focus_index,
                duration_secs,
                ..
            } => {
                println!(
                    "\r{:<40}",
                    format!("focus #{focus_index} done ({})", format_duration(*duration_secs))
                );
            }
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Config::load()?;
    let config = settings.cycle_config()?;
    let period = Duration::from_millis(settings.timer.tick_interval_ms.max(1));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_cycle(config, period))
}

async fn run_cycle(config: CycleConfig, period: Duration) -> Result<(), Box<dyn std::error::Error>> {
    let log = open_log()?;
    let audio = AudioCueSink::new(|cue: AudioCue| info!(?cue, "audio cue"));
    let mut engine = CycleEngine::new(config, (log, (ConsoleSink, audio)));

    engine.start(Utc::now());

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                engine.tick(Utc::now());
                if engine.phase().is_idle() {
                    break;
                }
                draw(&engine);
            }
            signal = &mut ctrl_c => {
                signal?;
                engine.reset();
                break;
            }
        }
    }

    let stats = engine.sink().0.stats();
    println!(
        "{} focus sessions logged, {} in total",
        stats.len(),
        format_duration(stats.total_secs())
    );
    Ok(())
}

fn draw<S: EventSink>(engine: &CycleEngine<S>) {
    let snapshot = engine.snapshot();
    let session = snapshot.session_label.unwrap_or_default();
    print!(
        "\r{:<24} {:>6} {}",
        snapshot.phase.to_string(),
        format_countdown(snapshot.remaining_secs),
        session
    );
    let _ = std::io::stdout().flush();
}

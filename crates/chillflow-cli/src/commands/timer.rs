use chillflow_core::{Config, CycleEngine, CycleError, CycleState, EventSink, KeyValueStore};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use tracing::{info, warn};

use super::open_log;

const STATE_KEY: &str = "chillflow_cycle_state";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the first focus session of a cycle
    Start,
    /// Pause the running phase
    Pause,
    /// Resume the paused phase
    Resume,
    /// Skip to the next phase without recording it
    Skip,
    /// Reset to idle
    Reset,
    /// Print current timer state as JSON
    Status,
}

fn load_state(store: &impl KeyValueStore) -> CycleState {
    match store.load(STATE_KEY) {
        Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!(error = %e, "saved timer state is unreadable; starting idle");
            CycleState::default()
        }),
        Ok(None) => CycleState::default(),
        Err(e) => {
            warn!(error = %e, "failed to load timer state; starting idle");
            CycleState::default()
        }
    }
}

fn save_state(
    store: &mut impl KeyValueStore,
    state: &CycleState,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = serde_json::to_vec(state)?;
    store.save(STATE_KEY, &bytes)?;
    Ok(())
}

/// Apply `action` at `now` after catching up on elapsed time.
///
/// `skip` does its own catch-up, so a phase that ran out while no process
/// was ticking completes and nothing further is skipped.
fn apply<S: EventSink>(
    engine: &mut CycleEngine<S>,
    action: &TimerAction,
    now: DateTime<Utc>,
) -> Result<(), CycleError> {
    if let TimerAction::Skip = action {
        return engine.skip(now);
    }

    let completed = engine.tick(now);
    if completed > 0 {
        info!(completed, "applied phase completions since last invocation");
    }

    match action {
        TimerAction::Start => engine.start(now),
        TimerAction::Pause => engine.pause(now),
        TimerAction::Resume => engine.resume(now),
        TimerAction::Reset => engine.reset(),
        TimerAction::Skip | TimerAction::Status => {}
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?.cycle_config()?;
    let mut log = open_log()?;
    let state = load_state(log.store());

    let mut engine = CycleEngine::restore(config, state, &mut log);
    let outcome = apply(&mut engine, &action, Utc::now());

    let snapshot = engine.snapshot();
    let (state, _) = engine.into_parts();
    save_state(log.store_mut(), &state)?;

    outcome?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

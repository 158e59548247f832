pub mod config;
pub mod run;
pub mod stats;
pub mod timer;

use chillflow_core::error::Result;
use chillflow_core::{Database, SessionLog};

/// Open the focus log in the data directory.
fn open_log() -> Result<SessionLog<Database>> {
    Ok(SessionLog::open(Database::open()?))
}

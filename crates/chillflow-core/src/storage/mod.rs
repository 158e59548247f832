mod config;
pub mod database;
mod memory;
mod session_log;

pub use config::{Config, CycleSettings, TimerSettings};
pub use database::Database;
pub use memory::MemoryStore;
pub use session_log::{SessionLog, LAUNCHED_KEY, RECORDS_KEY};

use std::path::PathBuf;

use crate::error::StoreError;

/// Opaque byte store keyed by string.
///
/// The cycle and stats layers only ever see this trait; what backs it is up
/// to the embedding application.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if it was never written.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}

/// Returns the data directory, creating it if needed.
///
/// `CHILLFLOW_DATA_DIR` wins when set. Otherwise `~/.config/chillflow/`,
/// or `~/.config/chillflow-dev/` when `CHILLFLOW_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("CHILLFLOW_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("CHILLFLOW_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("chillflow-dev")
            } else {
                base_dir.join("chillflow")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StoreError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

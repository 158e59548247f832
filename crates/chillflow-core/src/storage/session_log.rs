//! Persistent focus session log.
//!
//! Wraps a [`StatsAggregator`] with a [`KeyValueStore`]. The in-memory log
//! is authoritative: store failures are reported or logged, never rolled
//! back into the aggregator.

use chrono::{DateTime, Local, TimeZone};
use tracing::{info, warn};

use super::KeyValueStore;
use crate::error::StoreError;
use crate::events::{Event, EventSink};
use crate::stats::StatsAggregator;

/// Key holding the JSON-encoded focus records.
pub const RECORDS_KEY: &str = "chillflow_focus_records";
/// Key present once the application has launched at least once.
pub const LAUNCHED_KEY: &str = "chillflow_has_launched";

pub struct SessionLog<S> {
    store: S,
    stats: StatsAggregator,
}

impl<S: KeyValueStore> SessionLog<S> {
    /// Load the log from `store`.
    ///
    /// On the very first launch (no launch flag) the stored log is wiped and
    /// the flag is set. Unreadable data leaves an empty log.
    pub fn open(store: S) -> Self {
        let mut log = Self {
            store,
            stats: StatsAggregator::new(),
        };

        match log.store.load(LAUNCHED_KEY) {
            Ok(Some(_)) => log.stats = log.load_records(),
            Ok(None) => {
                info!("first launch; starting with an empty focus log");
                if let Err(e) = log.persist() {
                    warn!(error = %e, "failed to clear stored focus log");
                }
                if let Err(e) = log.store.save(LAUNCHED_KEY, b"true") {
                    warn!(error = %e, "failed to store launch flag");
                }
            }
            Err(e) => warn!(error = %e, "failed to read launch flag; focus log not loaded"),
        }
        log
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Append a completed session and save the log.
    ///
    /// # Errors
    /// Returns the store error if saving fails; the record stays in memory.
    pub fn record<Tz: TimeZone>(
        &mut self,
        duration_secs: u64,
        now: &DateTime<Tz>,
    ) -> Result<(), StoreError> {
        self.stats.record(duration_secs, now);
        self.persist()
    }

    /// Drop every record and save the empty log.
    ///
    /// # Errors
    /// Returns the store error if saving fails; the in-memory log is still cleared.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.stats.clear();
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&self.stats).map_err(|source| StoreError::Encoding {
            key: RECORDS_KEY.to_string(),
            source,
        })?;
        self.store.save(RECORDS_KEY, &bytes)
    }

    fn load_records(&self) -> StatsAggregator {
        match self.store.load(RECORDS_KEY) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(error = %e, "stored focus log is unreadable; starting empty");
                StatsAggregator::new()
            }),
            Ok(None) => StatsAggregator::new(),
            Err(e) => {
                warn!(error = %e, "failed to load focus log; starting empty");
                StatsAggregator::new()
            }
        }
    }
}

/// Records natural focus completions, stamped in local time.
impl<S: KeyValueStore> EventSink for SessionLog<S> {
    fn emit(&mut self, event: &Event) {
        if let Event::FocusCompleted {
            duration_secs,
            completed_at,
            ..
        } = event
        {
            let local = completed_at.with_timezone(&Local);
            if let Err(e) = self.record(*duration_secs, &local) {
                warn!(error = %e, "focus session kept in memory but not saved");
            }
        }
    }
}

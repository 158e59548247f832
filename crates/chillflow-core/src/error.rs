//! Core error types for chillflow-core.
//!
//! Every fallible surface of the library reports through one of the enums
//! below; [`CoreError`] wraps them all for callers that don't care which.

use std::path::PathBuf;
use thiserror::Error;

use crate::cycle::Phase;

/// Core error type for chillflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Cycle engine errors
    #[error("Cycle error: {0}")]
    Cycle(#[from] CycleError),

    /// Statistics query errors
    #[error("Stats error: {0}")]
    Stats(#[from] StatsError),

    /// Persistence errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by the cycle engine.
///
/// Almost every engine command is a no-op outside its valid phases; only
/// the cases listed here are surfaced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    /// The command cannot be applied in the current phase.
    #[error("cannot {operation} while {phase}")]
    InvalidOperation {
        operation: &'static str,
        phase: Phase,
    },
}

/// Errors raised by statistics queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// The requested week lies outside the representable calendar range.
    #[error("week offset {week_offset} is out of range")]
    WeekOutOfRange { week_offset: i64 },
}

/// Persistence-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Failed to encode or decode a stored value
    #[error("Failed to encode stored value for '{key}': {source}")]
    Encoding {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),

    /// The backing store refused the write
    #[error("Failed to save '{key}': {message}")]
    SaveFailed { key: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseBusy
                    || err.code == rusqlite::ErrorCode::DatabaseLocked
                {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

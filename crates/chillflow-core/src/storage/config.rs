//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Focus, rest and long rest durations
//! - Number of focus sessions per cycle
//! - Tick cadence of the foreground timer loop
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::cycle::{
    CycleConfig, DEFAULT_FOCUS_SECS, DEFAULT_LONG_REST_SECS, DEFAULT_MAX_SESSIONS,
    DEFAULT_REST_SECS,
};
use crate::error::ConfigError;

/// Cycle-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSettings {
    #[serde(default = "default_focus_duration")]
    pub focus_duration_secs: u64,
    #[serde(default = "default_rest_duration")]
    pub rest_duration_secs: u64,
    #[serde(default = "default_long_rest_duration")]
    pub long_rest_duration_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u32,
}

/// Foreground timer loop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cycle: CycleSettings,
    #[serde(default)]
    pub timer: TimerSettings,
}

// Default functions
fn default_focus_duration() -> u64 {
    DEFAULT_FOCUS_SECS
}
fn default_rest_duration() -> u64 {
    DEFAULT_REST_SECS
}
fn default_long_rest_duration() -> u64 {
    DEFAULT_LONG_REST_SECS
}
fn default_max_sessions() -> u32 {
    DEFAULT_MAX_SESSIONS
}
fn default_tick_interval() -> u64 {
    1000
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            focus_duration_secs: default_focus_duration(),
            rest_duration_secs: default_rest_duration(),
            long_rest_duration_secs: default_long_rest_duration(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default config file location.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location, writing the defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing the defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the
    /// defaults cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, coercing `value` to the
    /// type of the current value. The result must still form a valid cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or would make the cycle invalid. `self` is left unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check every setting.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cycle_config()?;
        if self.timer.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timer.tick_interval_ms".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// The validated cycle settings.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if a duration or the session count is zero.
    pub fn cycle_config(&self) -> Result<CycleConfig, ConfigError> {
        CycleConfig::new(
            self.cycle.focus_duration_secs,
            self.cycle.rest_duration_secs,
            self.cycle.long_rest_duration_secs,
            self.cycle.max_sessions,
        )
        .map_err(|e| match e {
            ConfigError::InvalidValue { key, message } => ConfigError::InvalidValue {
                key: format!("cycle.{key}"),
                message,
            },
            other => other,
        })
    }
}

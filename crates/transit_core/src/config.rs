//! Runtime configuration resolved from the process environment.
//!
//! # Responsibility
//! - Resolve the store location, logging settings and startup reset flag.
//!
//! # Invariants
//! - Values are trimmed; blank values fall back to defaults.
//! - Malformed booleans are rejected instead of silently defaulting.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "TRANSIT_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TRANSIT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TRANSIT_LOG_DIR";
pub const ENV_RESET_ON_START: &str = "TRANSIT_RESET_ON_START";

const DEFAULT_DB_FILE_NAME: &str = "transit_ticketing.sqlite3";
const IN_MEMORY_MARKER: &str = ":memory:";

/// Where the ticketing database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

/// Store settings.
///
/// The embedded engine needs only a location; host/user/password of a
/// server connection string have no counterpart here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: StoreLocation,
}

impl StoreConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::File(path.into()),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::Memory,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::file(std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
    }
}

/// Full process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub log_level: String,
    /// File logging is enabled only when a directory is configured.
    pub log_dir: Option<PathBuf>,
    /// Replace all data with the fixture set on every start.
    pub reset_on_start: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBool { var: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBool { var, value } => write!(
                f,
                "{var} must be one of true|false|1|0|yes|no, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let store = match read(ENV_DB_PATH) {
            Some(value) if value == IN_MEMORY_MARKER => StoreConfig::in_memory(),
            Some(value) => StoreConfig::file(value),
            None => StoreConfig::default(),
        };

        let reset_on_start = match read(ENV_RESET_ON_START) {
            Some(value) => parse_bool(ENV_RESET_ON_START, &value)?,
            None => false,
        };

        Ok(Self {
            store,
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
            reset_on_start,
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, StoreConfig, StoreLocation};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.log_dir, None);
        assert!(!config.reset_on_start);
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn db_path_accepts_file_and_memory_marker() {
        let file = config_from(&[("TRANSIT_DB_PATH", " /data/transit.db ")]).unwrap();
        assert_eq!(
            file.store.location,
            StoreLocation::File(PathBuf::from("/data/transit.db"))
        );

        let memory = config_from(&[("TRANSIT_DB_PATH", ":memory:")]).unwrap();
        assert_eq!(memory.store.location, StoreLocation::Memory);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[("TRANSIT_DB_PATH", "   "), ("TRANSIT_LOG_DIR", "")]).unwrap();
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn reset_flag_parses_and_rejects_garbage() {
        let enabled = config_from(&[("TRANSIT_RESET_ON_START", "YES")]).unwrap();
        assert!(enabled.reset_on_start);

        let err = config_from(&[("TRANSIT_RESET_ON_START", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("TRANSIT_RESET_ON_START"));
    }
}

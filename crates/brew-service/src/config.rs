//! # Service Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Environment Variables
//! - `BREW_DB_PATH`: SQLite file (default: platform data dir, `brew.db`)
//! - `BREW_DB_MAX_CONNECTIONS`: pool size (default: 5)
//! - `BREW_LOG`: log filter used when `RUST_LOG` is unset
//!
//! Configuration is read-only after loading, so no lock is needed.

use std::env;
use std::path::PathBuf;

use brew_db::DbConfig;
use directories::ProjectDirs;

/// Default log filter when neither `RUST_LOG` nor `BREW_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,brew=debug,sqlx=warn";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DB_FILE_NAME: &str = "brew.db";

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory")]
    NoDataDir,
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,

    /// Maximum number of pooled connections.
    pub max_connections: u32,

    /// tracing-subscriber filter directive.
    pub log_filter: String,
}

impl ServiceConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup("BREW_DB_PATH") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            Some(_) => return Err(ConfigError::InvalidValue("BREW_DB_PATH".to_string())),
            None => default_db_path()?,
        };

        let max_connections = match lookup("BREW_DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("BREW_DB_MAX_CONNECTIONS".to_string()))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let log_filter = lookup("BREW_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(ServiceConfig {
            db_path,
            max_connections,
            log_filter,
        })
    }

    /// Database configuration derived from this service configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.db_path.clone()).max_connections(self.max_connections)
    }
}

/// `<platform data dir>/brew.db`
fn default_db_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "brew", "coffee-maker").ok_or(ConfigError::NoDataDir)?;
    Ok(proj_dirs.data_dir().join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_values() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("BREW_DB_PATH", "/tmp/brew-test.db"),
            ("BREW_DB_MAX_CONNECTIONS", "3"),
            ("BREW_LOG", "warn"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/brew-test.db"));
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.db_config().max_connections, 3);
    }

    #[test]
    fn test_defaults() {
        let config =
            ServiceConfig::from_lookup(lookup(&[("BREW_DB_PATH", "brew.db")])).unwrap();
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_invalid_values() {
        let err = ServiceConfig::from_lookup(lookup(&[
            ("BREW_DB_PATH", "brew.db"),
            ("BREW_DB_MAX_CONNECTIONS", "zero"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref k) if k == "BREW_DB_MAX_CONNECTIONS"));

        assert!(ServiceConfig::from_lookup(lookup(&[
            ("BREW_DB_PATH", "brew.db"),
            ("BREW_DB_MAX_CONNECTIONS", "0"),
        ]))
        .is_err());

        assert!(ServiceConfig::from_lookup(lookup(&[("BREW_DB_PATH", "  ")])).is_err());
    }
}

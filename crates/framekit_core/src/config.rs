//! Runtime configuration for framekit front ends.
//!
//! # Responsibility
//! - Resolve database path and logging settings from the environment.
//! - Let callers override any resolved value explicitly.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never panics; invalid values surface as error strings.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "FRAMEKIT_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "FRAMEKIT_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "FRAMEKIT_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "framekit.sqlite3";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Normalized log level (`trace|debug|info|warn|error`).
    pub log_level: &'static str,
    /// File logging is enabled only when a directory is configured.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, falling back to defaults.
    ///
    /// # Errors
    /// - Returns an error when the configured log level is unsupported.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = match read(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        })
    }

    /// Applies explicit overrides on top of resolved values.
    pub fn with_overrides(
        mut self,
        db_path: Option<PathBuf>,
        log_level: Option<&str>,
        log_dir: Option<PathBuf>,
    ) -> Result<Self, String> {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(level) = log_level {
            self.log_level = normalize_level(level)?;
        }
        if log_dir.is_some() {
            self.log_dir = log_dir;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.db_path.ends_with("framekit.sqlite3"));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn environment_values_are_trimmed_and_blank_is_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " /data/frames.db "),
            (LOG_LEVEL_ENV, "WARNING"),
            (LOG_DIR_ENV, "   "),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/frames.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unsupported_level_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "verbose")])).unwrap_err();
        assert!(err.contains("unsupported log level"));
    }

    #[test]
    fn overrides_win_over_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "/data/a.db")]))
            .unwrap()
            .with_overrides(
                Some(PathBuf::from("/data/b.db")),
                Some("error"),
                Some(PathBuf::from("/var/log/framekit")),
            )
            .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/b.db"));
        assert_eq!(config.log_level, "error");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/framekit")));
    }
}

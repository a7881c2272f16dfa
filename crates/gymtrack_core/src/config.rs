//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Decide the database path and logging settings for host processes.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - `log_dir`, when set, is an absolute path.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "GYMTRACK_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "GYMTRACK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "GYMTRACK_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "gymtrack.sqlite3";

/// Settings shared by the FFI layer and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = non_blank(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = non_blank(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = non_blank(LOG_DIR_ENV)
            .map(PathBuf::from)
            .filter(|path| path.is_absolute());

        Self {
            db_path,
            log_level,
            log_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_ENV, DEFAULT_DB_FILE_NAME, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> CoreConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.db_path, std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[(DB_PATH_ENV, "   "), (LOG_LEVEL_ENV, "")]);
        assert_eq!(config.db_path, std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn explicit_values_are_trimmed_and_used() {
        let log_dir = std::env::temp_dir().join("gymtrack-logs");
        let log_dir_str = log_dir.to_str().expect("temp dir should be valid UTF-8");
        let config = config_from(&[
            (DB_PATH_ENV, " /data/gym.sqlite3 "),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, log_dir_str),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/data/gym.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(log_dir));
    }

    #[test]
    fn relative_log_dir_is_ignored() {
        let config = config_from(&[(LOG_DIR_ENV, "logs/dev")]);
        assert_eq!(config.log_dir, None);
    }
}

//! Application configuration.
//!
//! # Responsibility
//! - Resolve database path, log settings and timer durations.
//!
//! # Invariants
//! - Precedence: defaults, then the JSON file named by `STUDYDESK_CONFIG`,
//!   then the `STUDYDESK_DB_PATH` / `STUDYDESK_LOG_DIR` /
//!   `STUDYDESK_LOG_LEVEL` overrides.
//! - A resolved config always carries timer durations `TimerSettings` accepts.

use crate::logging::default_log_level;
use crate::pomodoro::{TimerSettings, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "STUDYDESK_CONFIG";
pub const DB_PATH_ENV: &str = "STUDYDESK_DB_PATH";
pub const LOG_DIR_ENV: &str = "STUDYDESK_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "STUDYDESK_LOG_LEVEL";

const DB_FILE_NAME: &str = "studydesk.sqlite3";
const LOG_DIR_NAME: &str = "studydesk-logs";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "malformed config `{}`: {source}", path.display())
            }
            Self::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let temp = std::env::temp_dir();
        Self {
            db_path: temp.join(DB_FILE_NAME),
            log_dir: temp.join(LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl AppConfig {
    /// Resolves from the process environment.
    pub fn resolve() -> Result<Self, ConfigError> {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolves using `lookup` in place of the process environment.
    pub fn resolve_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match non_blank(lookup(CONFIG_ENV)) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(db_path) = non_blank(lookup(DB_PATH_ENV)) {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(log_dir) = non_blank(lookup(LOG_DIR_ENV)) {
            config.log_dir = PathBuf::from(log_dir);
        }
        if let Some(level) = non_blank(lookup(LOG_LEVEL_ENV)) {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn timer_settings(&self) -> Result<TimerSettings, ConfigError> {
        TimerSettings::new(self.work_minutes, self.break_minutes)
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("dbPath cannot be empty".to_string()));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("logLevel cannot be empty".to_string()));
        }
        self.timer_settings().map(|_| ())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, CONFIG_ENV, DB_PATH_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = AppConfig::resolve_with(env(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.db_path.ends_with("studydesk.sqlite3"));
        assert_eq!(config.timer_settings().unwrap().work_minutes(), 25);
    }

    #[test]
    fn file_values_are_overridden_by_environment() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("studydesk.json");
        std::fs::write(
            &file,
            r#"{"dbPath": "/data/file.sqlite3", "logLevel": "warn", "workMinutes": 50}"#,
        )
        .unwrap();
        let file = file.to_string_lossy().to_string();

        let config = AppConfig::resolve_with(env(&[
            (CONFIG_ENV, file.as_str()),
            (DB_PATH_ENV, "/data/env.sqlite3"),
            (LOG_LEVEL_ENV, " "),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/data/env.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.work_minutes, 50);
        assert_eq!(config.break_minutes, 5);
    }

    #[test]
    fn out_of_range_durations_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.json");
        std::fs::write(&file, r#"{"breakMinutes": 0}"#).unwrap();

        let err = AppConfig::from_file(&file).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unreadable_and_malformed_files_are_distinguished() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            AppConfig::from_file(&missing),
            Err(ConfigError::Io { .. })
        ));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{not json").unwrap();
        assert!(matches!(
            AppConfig::from_file(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }
}

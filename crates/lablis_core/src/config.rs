//! Core runtime configuration.
//!
//! Resolved once at process startup and passed into services, so request
//! handling never reads process-wide environment variables.

use crate::db::SqliteFileProvider;
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    db_path: PathBuf,
    log_level: String,
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDbPath,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDbPath => write!(f, "database path cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

impl CoreConfig {
    /// Creates a config; `log_level` falls back to [`default_log_level`].
    pub fn new(
        db_path: impl Into<PathBuf>,
        log_level: Option<String>,
        log_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let db_path = db_path.into();
        if db_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDbPath);
        }

        Ok(Self {
            db_path,
            log_level: log_level.unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Directory for rolling log files; `None` leaves file logging off.
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    pub fn connection_provider(&self) -> SqliteFileProvider {
        SqliteFileProvider::new(self.db_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};
    use crate::logging::default_log_level;

    #[test]
    fn empty_db_path_is_rejected() {
        assert_eq!(
            CoreConfig::new("", None, None).unwrap_err(),
            ConfigError::EmptyDbPath
        );
    }

    #[test]
    fn log_level_defaults_to_build_mode_level() {
        let config = CoreConfig::new("lab.db", None, None).unwrap();
        assert_eq!(config.log_level(), default_log_level());
        assert!(config.log_dir().is_none());
        assert_eq!(config.connection_provider().path(), config.db_path());
    }
}

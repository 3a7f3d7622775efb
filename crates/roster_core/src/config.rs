//! Runtime configuration for roster front ends.
//!
//! # Responsibility
//! - Collect the database location, slot key and logging settings in one
//!   value with sensible defaults.
//! - Build the SQLite connection a session runs against.

use crate::db::{open_db, DbResult};
use crate::logging::{default_log_level, init_logging};
use crate::repo::roster_repo::DEFAULT_SLOT_KEY;
use rusqlite::Connection;
use std::path::PathBuf;

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "roster.sqlite3";

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// SQLite file holding the slot table.
    pub db_path: PathBuf,
    /// Slot key the roster document is stored under.
    pub slot_key: String,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` disables file logs.
    pub log_dir: Option<PathBuf>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl RosterConfig {
    /// Starts file logging when `log_dir` is set.
    ///
    /// Returns `Ok(false)` when logging is disabled by configuration.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = self.log_dir.as_ref() else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir `{}` is not valid UTF-8", log_dir.display()))?;
        init_logging(&self.log_level, log_dir)?;
        Ok(true)
    }

    /// Opens and migrates the configured database.
    pub fn open_connection(&self) -> DbResult<Connection> {
        open_db(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::RosterConfig;

    #[test]
    fn default_config_uses_relative_db_and_no_file_logging() {
        let config = RosterConfig::default();
        assert_eq!(config.db_path.to_str(), Some("roster.sqlite3"));
        assert_eq!(config.slot_key, "student_roster");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn init_logging_is_a_no_op_without_log_dir() {
        let config = RosterConfig::default();
        assert_eq!(config.init_logging(), Ok(false));
    }
}

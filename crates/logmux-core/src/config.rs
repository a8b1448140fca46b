//! Logger configuration.
//!
//! Every knob the environment surface exposes lives here with a documented
//! default; nothing is a hidden constant. Rotation interval is fixed at
//! daily (midnight boundary) per the sink rollover contract.

use std::path::PathBuf;

use crate::record::Level;

/// Default base directory for both sink files.
pub const DEFAULT_LOG_DIR: &str = "var/logs";
/// Default logical logger name.
pub const DEFAULT_LOGGER_NAME: &str = "logmux";
/// Rotated files retained per sink.
pub const DEFAULT_MAX_LOG_FILES: usize = 30;
/// File name prefix of the text sink (`app.<date>.log`).
pub const TEXT_LOG_PREFIX: &str = "app";
/// File name prefix of the JSON-lines sink (`app.json.<date>.log`).
pub const JSON_LOG_PREFIX: &str = "app.json";

/// Configuration for a [`Logger`](crate::Logger) and its two file sinks.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Base directory for sink files. Created on init if missing.
    pub log_dir: PathBuf,
    /// Logical source name stamped on every record.
    pub name: String,
    /// Minimum severity admitted by the text sink.
    pub text_min_level: Level,
    /// Minimum severity admitted by the JSON sink.
    pub json_min_level: Level,
    /// Rotated files retained per sink; each sink rotates daily and
    /// independently.
    pub max_log_files: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            name: DEFAULT_LOGGER_NAME.to_string(),
            text_min_level: Level::Info,
            json_min_level: Level::Info,
            max_log_files: DEFAULT_MAX_LOG_FILES,
        }
    }
}

impl LoggerConfig {
    /// Build a config from `LOGMUX_*` environment variables, falling back
    /// to the documented defaults for anything unset or unparseable.
    ///
    /// - `LOGMUX_LOG_DIR`
    /// - `LOGMUX_LOGGER_NAME`
    /// - `LOGMUX_TEXT_LEVEL` / `LOGMUX_JSON_LEVEL` (debug|info|warn|error)
    /// - `LOGMUX_MAX_LOG_FILES`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_dir: std::env::var("LOGMUX_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            name: std::env::var("LOGMUX_LOGGER_NAME").unwrap_or(defaults.name),
            text_min_level: std::env::var("LOGMUX_TEXT_LEVEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.text_min_level),
            json_min_level: std::env::var("LOGMUX_JSON_LEVEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.json_min_level),
            max_log_files: std::env::var("LOGMUX_MAX_LOG_FILES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_log_files),
        }
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_min_level(mut self, level: Level) -> Self {
        self.text_min_level = level;
        self.json_min_level = level;
        self
    }
}

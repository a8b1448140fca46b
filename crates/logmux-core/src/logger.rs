//! The leveled logging facade.
//!
//! Every call reads the ambient `RequestContext`, merges it with any
//! caller-supplied extras, and fans the resulting record out to an
//! ordered set of sinks. Adding a sink changes nothing at call sites.

use serde_json::{Map, Value};

use crate::config::{LoggerConfig, JSON_LOG_PREFIX, TEXT_LOG_PREFIX};
use crate::context::current_context;
use crate::error::LoggerError;
use crate::format::{JsonFormatter, TextFormatter};
use crate::record::{is_reserved_field, utc_now_iso8601, FailureDetails, Level, LogRecord};
use crate::sink::Sink;

/// Extra key/value pairs supplied per call.
pub type Fields = Map<String, Value>;

pub struct Logger {
    name: String,
    sinks: Vec<Sink>,
}

impl Logger {
    /// Construct the standard dual-sink logger: a text file and a JSON
    /// lines file under `config.log_dir`, each with daily rotation and
    /// `config.max_log_files` retention.
    pub fn new(config: &LoggerConfig) -> Result<Self, LoggerError> {
        std::fs::create_dir_all(&config.log_dir).map_err(|source| LoggerError::CreateDir {
            path: config.log_dir.clone(),
            source,
        })?;

        let sinks = vec![
            Sink::rolling(
                &config.log_dir,
                TEXT_LOG_PREFIX,
                Box::new(TextFormatter),
                config.text_min_level,
                config.max_log_files,
            )?,
            Sink::rolling(
                &config.log_dir,
                JSON_LOG_PREFIX,
                Box::new(JsonFormatter),
                config.json_min_level,
                config.max_log_files,
            )?,
        ];

        Ok(Self::with_sinks(config.name.clone(), sinks))
    }

    /// Construct a logger over an explicit sink set.
    pub fn with_sinks(name: impl Into<String>, sinks: Vec<Sink>) -> Self {
        Self {
            name: name.into(),
            sinks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn debug(&self, message: impl Into<String>, extras: Option<Fields>) {
        self.log(Level::Debug, message, extras, None);
    }

    pub fn info(&self, message: impl Into<String>, extras: Option<Fields>) {
        self.log(Level::Info, message, extras, None);
    }

    pub fn warn(&self, message: impl Into<String>, extras: Option<Fields>) {
        self.log(Level::Warn, message, extras, None);
    }

    pub fn error(&self, message: impl Into<String>, extras: Option<Fields>) {
        self.log(Level::Error, message, extras, None);
    }

    /// Error record with failure capture: the error's display form, its
    /// source chain, and a backtrace are attached to the record. The error
    /// itself is only observed, never consumed or altered.
    pub fn error_with(
        &self,
        message: impl Into<String>,
        error: &(dyn std::error::Error + 'static),
        extras: Option<Fields>,
    ) {
        self.log(
            Level::Error,
            message,
            extras,
            Some(FailureDetails::capture(error)),
        );
    }

    /// The single write path behind every level method.
    ///
    /// Merge precedence: context `extra` entries form the base, caller
    /// extras are layered on top and win on collision. Reserved record
    /// fields (identity fields included) are never shadowed by either.
    pub fn log(
        &self,
        level: Level,
        message: impl Into<String>,
        extras: Option<Fields>,
        failure: Option<FailureDetails>,
    ) {
        let ctx = current_context();

        let mut fields = Fields::new();
        if let Some(extra) = &ctx.extra {
            for (key, value) in extra {
                if !is_reserved_field(key) {
                    fields.insert(key.clone(), value.clone());
                }
            }
        }
        if let Some(extras) = extras {
            for (key, value) in extras {
                if !is_reserved_field(&key) {
                    fields.insert(key, value);
                }
            }
        }

        let record = LogRecord {
            timestamp: utc_now_iso8601(),
            level,
            logger: self.name.clone(),
            message: message.into(),
            request_id: ctx.request_id,
            user_id: ctx.user_id,
            fields,
            failure,
        };

        for sink in &self.sinks {
            sink.write(&record);
        }
    }
}

//! Log levels and the ephemeral per-call log record.

use std::fmt;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde_json::Map;

/// Severity of a log record. Ordered so sinks can filter with `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown level name in configuration input.
#[derive(Debug, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

/// Field names owned by the record itself. Context `extra` entries and
/// caller-supplied extras may never shadow these.
pub const RESERVED_FIELDS: &[&str] = &[
    "timestamp",
    "level",
    "message",
    "logger",
    "request_id",
    "user_id",
];

pub fn is_reserved_field(key: &str) -> bool {
    RESERVED_FIELDS.contains(&key)
}

/// Current UTC time as an ISO-8601 string with microsecond precision.
pub fn utc_now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Captured failure details attached to an error-level record.
#[derive(Debug, Clone)]
pub struct FailureDetails {
    /// Display form of the failure.
    pub error: String,
    /// Source chain, outermost cause first.
    pub chain: Vec<String>,
    /// Captured backtrace text.
    pub stack: String,
}

impl FailureDetails {
    /// Capture an error's display form, source chain, and a backtrace.
    pub fn capture(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        Self {
            error: error.to_string(),
            chain,
            stack: std::backtrace::Backtrace::force_capture().to_string(),
        }
    }
}

/// One log call's worth of data, already merged with the ambient context.
///
/// Exists only long enough to be rendered by each sink's formatter.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Render time (UTC ISO-8601). Distinct from the context's own
    /// `timestamp` field, which records context construction time.
    pub timestamp: String,
    pub level: Level,
    /// Logical source name of the emitting logger.
    pub logger: String,
    pub message: String,
    pub request_id: String,
    pub user_id: String,
    /// Merged extra fields: context `extra` as the base, caller-supplied
    /// extras layered on top. Reserved field names are already filtered out.
    pub fields: Map<String, serde_json::Value>,
    /// Present only when the call asked for failure capture.
    pub failure: Option<FailureDetails>,
}

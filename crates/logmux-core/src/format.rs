//! Rendering of log records into sink output encodings.
//!
//! Both formatters consume the same `LogRecord`; each sink pairs one
//! formatter with one writer, so a record renders independently per sink.

use serde_json::{Map, Value};

use crate::record::LogRecord;

/// Renders one record into one output line (without trailing newline).
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> String;
}

/// Human-readable line format:
/// `<timestamp> - <LEVEL> - [REQ:<request_id>][USER:<user_id>] - <logger> - <message>`
///
/// A captured failure appends its backtrace below the line, still emitted
/// as a single write.
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let mut line = format!(
            "{} - {} - [REQ:{}][USER:{}] - {} - {}",
            record.timestamp,
            record.level,
            record.request_id,
            record.user_id,
            record.logger,
            record.message
        );
        if let Some(failure) = &record.failure {
            line.push('\n');
            line.push_str(&failure.error);
            line.push('\n');
            line.push_str(failure.stack.trim_end());
        }
        line
    }
}

/// One JSON object per line: `timestamp` (render time), `level`,
/// `message`, `logger`, `request_id`, `user_id`, then all merged extra
/// fields spread at the top level. Captured failures add `error`,
/// `error_chain`, and `stack`.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let mut map = Map::new();
        map.insert(
            "timestamp".to_string(),
            Value::String(record.timestamp.clone()),
        );
        map.insert(
            "level".to_string(),
            Value::String(record.level.as_str().to_string()),
        );
        map.insert("message".to_string(), Value::String(record.message.clone()));
        map.insert("logger".to_string(), Value::String(record.logger.clone()));
        map.insert(
            "request_id".to_string(),
            Value::String(record.request_id.clone()),
        );
        map.insert("user_id".to_string(), Value::String(record.user_id.clone()));

        for (key, value) in &record.fields {
            map.insert(key.clone(), value.clone());
        }

        if let Some(failure) = &record.failure {
            map.insert("error".to_string(), Value::String(failure.error.clone()));
            if !failure.chain.is_empty() {
                map.insert(
                    "error_chain".to_string(),
                    Value::Array(
                        failure
                            .chain
                            .iter()
                            .map(|cause| Value::String(cause.clone()))
                            .collect(),
                    ),
                );
            }
            map.insert("stack".to_string(), Value::String(failure.stack.clone()));
        }

        serde_json::to_string(&Value::Object(map)).unwrap_or_else(|_| {
            format!(
                r#"{{"level":"{}","message":"record could not be serialized"}}"#,
                record.level
            )
        })
    }
}

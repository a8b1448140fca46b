//! Output sinks: a formatter paired with a level-filtered writer.
//!
//! The production writers are daily-rolling file appenders with bounded
//! retention. Writes are serialized per sink so each record lands as one
//! uninterrupted write; a failed write is reported on stderr and
//! swallowed, never surfaced to the logging call site.

use std::io::Write;
use std::path::Path;

use parking_lot::Mutex;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::error::LoggerError;
use crate::format::Formatter;
use crate::record::{Level, LogRecord};

pub struct Sink {
    label: String,
    formatter: Box<dyn Formatter>,
    min_level: Level,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Sink {
    /// A sink over an arbitrary writer. Used by tests and by callers
    /// fanning out to non-file destinations.
    pub fn new(
        label: impl Into<String>,
        formatter: Box<dyn Formatter>,
        min_level: Level,
        writer: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            label: label.into(),
            formatter,
            min_level,
            writer: Mutex::new(writer),
        }
    }

    /// A sink backed by a daily-rolling file appender.
    ///
    /// Files are named `<prefix>.<YYYY-MM-DD>.log`; the appender rotates at
    /// the day boundary and prunes to `max_log_files` retained files. The
    /// file handle stays open for the sink's lifetime and is reopened
    /// transparently at rotation.
    pub fn rolling(
        dir: &Path,
        prefix: &str,
        formatter: Box<dyn Formatter>,
        min_level: Level,
        max_log_files: usize,
    ) -> Result<Self, LoggerError> {
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(prefix)
            .filename_suffix("log")
            .max_log_files(max_log_files)
            .build(dir)
            .map_err(|source| LoggerError::Appender {
                prefix: prefix.to_string(),
                source,
            })?;
        Ok(Self::new(prefix, formatter, min_level, Box::new(appender)))
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Render and write one record, applying this sink's level filter.
    ///
    /// The whole rendered record (newline included) goes through a single
    /// `write_all` under the sink lock, so records are never interleaved.
    pub fn write(&self, record: &LogRecord) {
        if record.level < self.min_level {
            return;
        }
        let mut line = self.formatter.format(record);
        line.push('\n');

        let mut writer = self.writer.lock();
        if let Err(e) = writer.write_all(line.as_bytes()) {
            eprintln!("logmux: write to sink '{}' failed: {}", self.label, e);
        }
    }
}

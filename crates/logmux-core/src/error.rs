//! Typed errors for logger initialization.
//!
//! Runtime write failures are deliberately NOT represented here: they are
//! contained inside the sinks and reported on stderr, never returned to
//! logging call sites.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize rolling appender for {prefix}: {source}")]
    Appender {
        prefix: String,
        #[source]
        source: tracing_appender::rolling::InitError,
    },
}

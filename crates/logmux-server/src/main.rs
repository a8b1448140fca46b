//! Logmux service binary.

use std::sync::Arc;

use tracing::info;

use logmux_core::{Logger, LoggerConfig};
use logmux_server::{Server, ServerConfig};

/// Console diagnostics for the service itself. The application's own
/// dual-sink file logger is configured separately via `LoggerConfig`.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    // RUST_LOG takes precedence, with sensible defaults for our crates
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info")
            .add_directive("logmux_core=debug".parse().unwrap())
            .add_directive("logmux_server=debug".parse().unwrap())
    });

    // Console layer: colored, compact
    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (for development)
    dotenvy::dotenv().ok();

    init_tracing();

    let logger_config = LoggerConfig::from_env();
    info!(
        "[Server] Log sinks under {} (text: {:?}, json: {:?})",
        logger_config.log_dir.display(),
        logger_config.text_min_level,
        logger_config.json_min_level
    );
    let logger = Arc::new(Logger::new(&logger_config)?);

    let config = ServerConfig::from_env();
    Server::new(config, logger).run().await
}

//! Shared test utilities and fixtures for Logmux integration tests.

use std::path::Path;

use logmux_core::{Level, Logger, LoggerConfig};

/// Logger config pointed at a test-owned directory.
pub fn logger_config(dir: &Path) -> LoggerConfig {
    LoggerConfig::default()
        .with_log_dir(dir)
        .with_name("logmux-test")
}

/// Standard dual-sink logger (INFO minimum on both sinks).
pub fn test_logger(dir: &Path) -> Logger {
    Logger::new(&logger_config(dir)).expect("logger init")
}

/// Dual-sink logger with both sinks lowered to DEBUG.
pub fn debug_logger(dir: &Path) -> Logger {
    Logger::new(&logger_config(dir).with_min_level(Level::Debug)).expect("logger init")
}

/// All lines currently in the text sink (`app.<date>.log` files).
pub fn text_sink_lines(dir: &Path) -> Vec<String> {
    sink_lines(dir, false)
}

/// All lines currently in the JSON sink (`app.json.<date>.log` files).
pub fn json_sink_lines(dir: &Path) -> Vec<String> {
    sink_lines(dir, true)
}

/// Every JSON sink line, parsed. Panics on an unparseable line, so using
/// this helper doubles as the valid-JSON-per-line assertion.
pub fn json_sink_records(dir: &Path) -> Vec<serde_json::Value> {
    json_sink_lines(dir)
        .iter()
        .map(|line| serde_json::from_str(line).expect("every JSON sink line parses on its own"))
        .collect()
}

fn sink_lines(dir: &Path, json: bool) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("log dir readable")
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .filter(|name| {
            if json {
                name.starts_with("app.json.")
            } else {
                name.starts_with("app.") && !name.starts_with("app.json.")
            }
        })
        .collect();
    names.sort();

    let mut lines = Vec::new();
    for name in names {
        let content = std::fs::read_to_string(dir.join(name)).expect("sink file readable");
        lines.extend(content.lines().map(String::from));
    }
    lines
}

/// End-to-end HTTP server helpers
pub mod server {
    use std::net::SocketAddr;
    use std::path::Path;
    use std::sync::Arc;

    use logmux_server::{Server, ServerConfig};

    /// Spin up the real router on an ephemeral port, with sinks under
    /// `log_dir`. Returns the bound address.
    pub async fn spawn_app(log_dir: &Path) -> SocketAddr {
        let logger = Arc::new(super::test_logger(log_dir));
        let server = Server::new(ServerConfig::default(), logger);
        let router = server.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        addr
    }
}

//! Logmux Server
//!
//! HTTP service exposing a health check and a test-logging endpoint, with
//! request-scoped structured logging wired in as middleware.

pub mod error;
pub mod handlers;
pub mod logging_middleware;
mod state;

pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use logmux_core::Logger;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8081;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS for browser access
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid address")
    }

    /// Build a config from `LOGMUX_*` environment variables, falling back
    /// to defaults: `LOGMUX_HOST`, `LOGMUX_PORT`, `LOGMUX_ENABLE_CORS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("LOGMUX_HOST").unwrap_or(defaults.host),
            port: std::env::var("LOGMUX_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            enable_cors: std::env::var("LOGMUX_ENABLE_CORS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.enable_cors),
        }
    }
}

/// The HTTP server. Owns its configuration and application state; the
/// logger is injected so tests and other environments can supply their own.
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    pub fn new(config: ServerConfig, logger: Arc<Logger>) -> Self {
        Self {
            config,
            state: AppState { logger },
        }
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        let mut router = Router::new()
            .route("/ping", get(handlers::ping))
            .route("/test-log", post(handlers::test_log))
            .route("/health", get(handlers::health))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            // Outermost: every handler and layer below runs inside the
            // request's context scope
            .layer(middleware::from_fn(
                logging_middleware::request_context_middleware,
            ));

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Run the server until the process exits.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.addr();

        info!("[Server] Starting on {}", addr);
        info!(
            "[Server] CORS: {}",
            if self.config.enable_cors {
                "enabled"
            } else {
                "disabled"
            }
        );

        let router = self.router();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("[Server] Ready to accept connections");

        axum::serve(listener, router).await?;

        Ok(())
    }

    /// Start the server in the background
    pub fn spawn(self) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        tokio::spawn(async move { self.run().await })
    }
}

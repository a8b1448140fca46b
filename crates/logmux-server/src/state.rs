//! Application state shared across handlers.

use std::sync::Arc;

use logmux_core::Logger;

/// Injected into every handler. The logger is constructed once at startup
/// and shared; handlers never own context data, they only read the ambient
/// context through the logger at call time.
#[derive(Clone)]
pub struct AppState {
    pub logger: Arc<Logger>,
}

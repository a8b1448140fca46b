//! Request-scoped ambient context.
//!
//! A `RequestContext` is created per incoming request and stored in
//! task-local storage for the duration of that request's execution scope.
//! Log calls read it implicitly; concurrent requests never observe each
//! other's context.

use std::cell::RefCell;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

use crate::record::utc_now_iso8601;

/// Sentinel for identity fields that were never set.
pub const UNSET: &str = "-";

/// Global request counter for request-id generation
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a short, unique correlation id for a request.
/// Format: 8 hex characters (e.g., "a1b2c3d4").
pub fn generate_request_id() -> String {
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0);

    // Mix counter and timestamp for uniqueness
    let mixed = counter.wrapping_add(timestamp);
    format!("{:08x}", mixed & 0xFFFF_FFFF)
}

/// Contextual fields attached to every log record emitted while a
/// request is being handled.
///
/// Identity fields carry the `"-"` sentinel when never set; `extra` is
/// omitted from projections entirely while absent.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Context construction time (UTC ISO-8601).
    pub timestamp: String,
    pub request_id: String,
    pub user_id: String,
    pub extra: Option<Map<String, Value>>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestContext {
    /// A fresh context: sentinel identities, current timestamp, no extras.
    pub fn new() -> Self {
        Self {
            timestamp: utc_now_iso8601(),
            request_id: UNSET.to_string(),
            user_id: UNSET.to_string(),
            extra: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Add one extra key/value pair, creating the map on first use.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Project the context into a flat field map.
    ///
    /// Identity fields are always present (minimum `"-"`); `extra` entries
    /// are spread at the top level, and an absent `extra` contributes
    /// nothing. No key ever maps to null.
    pub fn as_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("timestamp".to_string(), Value::String(self.timestamp.clone()));
        map.insert(
            "request_id".to_string(),
            Value::String(self.request_id.clone()),
        );
        map.insert("user_id".to_string(), Value::String(self.user_id.clone()));
        if let Some(extra) = &self.extra {
            for (key, value) in extra {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }
}

tokio::task_local! {
    static CONTEXT: RefCell<RequestContext>;
}

/// Run `future` with `ctx` as the ambient context.
///
/// The middleware enters one scope per request; tests and non-HTTP
/// callers can use this directly. The context is dropped when the scope
/// ends, never explicitly torn down.
pub async fn scope<F>(ctx: RequestContext, future: F) -> F::Output
where
    F: Future,
{
    CONTEXT.scope(RefCell::new(ctx), future).await
}

/// Replace the ambient context for the current execution scope.
///
/// Full replacement: fields not set on `ctx` carry their defaults, never
/// values from the previous context. Always succeeds; outside any scope
/// there is no ambient store and the call is a silent no-op.
pub fn set_context(ctx: RequestContext) {
    let _ = CONTEXT.try_with(|cell| *cell.borrow_mut() = ctx);
}

/// The ambient context for the current execution scope, or a
/// default-constructed one when no scope was ever entered.
pub fn current_context() -> RequestContext {
    CONTEXT
        .try_with(|cell| cell.borrow().clone())
        .unwrap_or_default()
}

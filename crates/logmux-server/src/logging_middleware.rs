//! Request context middleware
//!
//! Enters one context scope per request so every log call during handling
//! reads the same ambient `RequestContext`, invisible to intervening code.
//! Honors an incoming `x-request-id` header, generates a correlation id
//! otherwise, and echoes the id on the response.

use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use logmux_core::{generate_request_id, scope, RequestContext};

/// Correlation header, preserved when the caller already set it.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Per-request middleware: scope the ambient context, correlate, and log
/// a single entry/exit line pair.
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
        .unwrap_or_else(generate_request_id);

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    // Make the id visible to downstream extractors as well
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        request.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }

    info!(request_id = %request_id, "→ {} {}", method, path);

    let ctx = RequestContext::new().with_request_id(request_id.as_str());
    let mut response = scope(ctx, next.run(request)).await;

    info!(
        request_id = %request_id,
        "← {} ({}ms)",
        response.status().as_u16(),
        started.elapsed().as_millis()
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }

    response
}

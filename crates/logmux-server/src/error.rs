//! Application-level errors surfaced through the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Deliberate failure raised by the test-logging endpoint when the
    /// trigger message is received.
    #[error("테스트 에러 발생")]
    TestFailure,
}

impl IntoResponse for AppError {
    /// The logging subsystem only observes application failures; by the
    /// time one reaches this conversion it has already been recorded and
    /// surfaces here unchanged as a server error.
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}

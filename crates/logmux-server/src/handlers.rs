//! HTTP handlers for the logging service

use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use logmux_core::{set_context, RequestContext};

use crate::error::AppError;
use crate::state::AppState;

/// Ping response payload
#[derive(Serialize)]
pub struct PingResponse {
    pub status: String,
    pub message: String,
}

/// Simple liveness endpoint. Logs one info record with whatever identity
/// the middleware put in scope.
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    state.logger.info("ping 요청 받음", None);
    Json(PingResponse {
        status: "ok".to_string(),
        message: "pong".to_string(),
    })
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct TestLogRequest {
    pub user_id: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct TestLogResponse {
    pub status: String,
    pub message: String,
    pub your_message: String,
}

/// Test-logging endpoint.
///
/// Replaces the ambient context with one carrying only the caller's user
/// id (full replacement: the middleware-assigned request id reverts to its
/// sentinel), emits an info and a debug record, and on the trigger message
/// records the failure with capture before letting it propagate unchanged.
pub async fn test_log(
    State(state): State<AppState>,
    Json(request): Json<TestLogRequest>,
) -> Result<Json<TestLogResponse>, AppError> {
    set_context(RequestContext::new().with_user_id(request.user_id.as_str()));

    state
        .logger
        .info(format!("테스트 메시지 수신: {}", request.message), None);
    state.logger.debug("디버그 레벨 로그 테스트", None);

    if request.message == "error" {
        let error = AppError::TestFailure;
        state
            .logger
            .error_with(format!("에러 발생: {}", error), &error, None);
        return Err(error);
    }

    Ok(Json(TestLogResponse {
        status: "success".to_string(),
        message: "로그 테스트 완료".to_string(),
        your_message: request.message,
    }))
}

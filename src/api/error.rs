use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::client::ClientError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Input failed validation; never retried, never reaches the backend
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Backend not initialized yet; caller should retry after a delay
    #[error("Service unavailable: {0}")]
    NotReady(String),

    /// The remote inference call failed
    #[error("Remote call failed: {0}")]
    Upstream(#[from] ClientError),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Convert ApiError into HTTP response.
///
/// Validation errors keep the bare `{"error": ...}` body; everything else
/// uses the `{"success": false, "error": ...}` failure shape.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::NotReady(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "success": false, "error": msg })),
            )
                .into_response(),
            ApiError::Upstream(e) => {
                tracing::error!(error = %e, "Prediction error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": e.to_string() })),
                )
                    .into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": msg })),
                )
                    .into_response()
            }
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

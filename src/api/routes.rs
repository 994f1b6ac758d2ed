use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{
    HealthResponse, PredictRequest, PredictResponse, ReadyResponse, RootResponse,
};
use crate::config::MAX_TEXT_LENGTH;
use crate::readiness::ReadinessState;
use crate::state::AppState;

/// Service banner
#[instrument]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "Proxy server is running".to_string(),
        message: "Use /predict endpoint".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Forward text to the remote inference endpoint
#[instrument(skip(state, body))]
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> ApiResult<Json<PredictResponse>> {
    let Json(req) = body
        .map_err(|_| ApiError::BadRequest("Missing 'text' in request body".to_string()))?;

    // Under the lazy strategy the first predict attempt starts
    // construction; the request itself still sees 503 below.
    state.trigger_lazy_init();

    let text = req.text;
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text cannot be empty".to_string()));
    }

    // Length in UTF-16 code units, as received
    let input_length = text.encode_utf16().count();
    if input_length > MAX_TEXT_LENGTH {
        return Err(ApiError::BadRequest(
            "Text too long. Maximum 10000 characters allowed".to_string(),
        ));
    }

    // The backend is only touched after observing Ready; in every other
    // state the remote client must not be invoked.
    let backend = match state.readiness.current_state() {
        ReadinessState::Ready => state.readiness.backend().ok_or_else(|| {
            ApiError::Internal("Backend handle missing in ready state".to_string())
        })?,
        ReadinessState::Failed(reason) => {
            return Err(ApiError::NotReady(format!(
                "Inference backend failed to initialize: {}",
                reason
            )));
        }
        ReadinessState::Uninitialized | ReadinessState::Initializing => {
            return Err(ApiError::NotReady(
                "Inference backend is still initializing. Try again shortly".to_string(),
            ));
        }
    };

    let result = backend.predict(&text).await?;

    info!(input_length, "Successfully processed text");

    Ok(Json(PredictResponse {
        success: true,
        input_length,
        result,
        message: "Successfully processed".to_string(),
    }))
}

/// Liveness probe: 200 whenever the process serves requests, in every
/// readiness state. Never touches the backend, so a warming or broken
/// upstream cannot get the process killed by orchestration.
#[instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness probe: 200 iff the backend client is constructed, else 503
/// with the current state. Gates traffic admission, not process restart.
#[instrument(skip(state))]
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let readiness_state = state.readiness.current_state();

    let (status, body) = match &readiness_state {
        ReadinessState::Ready => (
            StatusCode::OK,
            ReadyResponse {
                ready: true,
                state: readiness_state.label().to_string(),
                error: None,
            },
        ),
        ReadinessState::Failed(reason) => (
            StatusCode::SERVICE_UNAVAILABLE,
            ReadyResponse {
                ready: false,
                state: readiness_state.label().to_string(),
                error: Some(reason.clone()),
            },
        ),
        _ => (
            StatusCode::SERVICE_UNAVAILABLE,
            ReadyResponse {
                ready: false,
                state: readiness_state.label().to_string(),
                error: None,
            },
        ),
    };

    (status, Json(body))
}

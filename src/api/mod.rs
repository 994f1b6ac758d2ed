pub mod error;
pub mod routes;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Service banner
        .route("/", get(routes::root))
        // Prediction endpoint
        .route("/predict", post(routes::predict))
        // Probes: liveness is local-only, readiness reflects the backend
        .route("/health", get(routes::health))
        .route("/ready", get(routes::ready))
        // Attach application state
        .with_state(state)
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

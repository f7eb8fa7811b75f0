//! Health check endpoint.

use axum::{extract::State, routing::get, Json, Router};

use crate::json::HealthResponse;
use crate::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check handler. Reports the cache state without triggering a load.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.service.cache();
    let records_loaded = cache.is_populated();
    // A failed load with nothing cached means queries are currently failing.
    let degraded = !records_loaded && cache.stats().failures() > 0;

    Json(HealthResponse {
        status: if degraded { "degraded" } else { "healthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records_loaded,
    })
}

//! recordview HTTP/JSON Gateway.
//!
//! This crate exposes the record query pipeline over HTTP: `GET /api/records`
//! returns one page of filtered, sorted work records, and `GET /health`
//! reports whether the record collection is loaded.

pub mod config;
pub mod error;
pub mod json;
pub mod routes;

pub use config::{Args, GatewayConfig};
pub use error::AppError;

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use recordview_core::RecordService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Record query service.
    pub service: Arc<RecordService>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new application state.
    pub fn new(service: RecordService, config: GatewayConfig) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }
}

/// CORS policy letting the configured origin read records.
fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods([Method::GET]);

    if origin == "*" {
        return cors.allow_origin(Any);
    }

    match origin.parse::<HeaderValue>() {
        Ok(value) => cors.allow_origin(value),
        Err(e) => {
            warn!(origin, error = %e, "Ignoring invalid CORS origin");
            cors
        }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::records::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

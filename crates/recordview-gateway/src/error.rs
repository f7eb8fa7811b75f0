//! Error handling for the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recordview_core::{InvalidQueryError, LoadError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Query parameters were rejected before the pipeline ran.
    InvalidQuery(String),
    /// The record collection could not be loaded.
    Load(String),
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error flag.
    pub error: bool,
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidQuery(msg) => {
                warn!(error = %msg, "Rejected record query");
                (StatusCode::BAD_REQUEST, "INVALID_QUERY", msg)
            }
            AppError::Load(msg) => {
                error!(error = %msg, "Failed to load records");
                (StatusCode::INTERNAL_SERVER_ERROR, "LOAD_ERROR", msg)
            }
        };

        let body = ErrorResponse {
            error: true,
            code: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<InvalidQueryError> for AppError {
    fn from(err: InvalidQueryError) -> Self {
        AppError::InvalidQuery(err.to_string())
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::Load(err.to_string())
    }
}

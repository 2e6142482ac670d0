//! Error types for the request-handling layer
//!
//! The cache and the limiter are total and never fail; these errors only
//! describe what the HTTP layer reports to its callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Message returned to callers turned away by the rate limiter.
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

// == Guard Error Enum ==
/// Unified error type for the HTTP layer.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Caller exhausted its quota for the current window
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let status = match &self {
            GuardError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GuardError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GuardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, GuardError>;

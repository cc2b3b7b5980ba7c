//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::clients::UpstreamError;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unknown username or missing resource
    #[error("{0}")]
    NotFound(String),

    /// Duplicate username or email at signup
    #[error("{0}")]
    Conflict(String),

    /// Rejected request input
    #[error("{0}")]
    Validation(String),

    /// Login failure, deliberately undifferentiated between unknown user
    /// and wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Action requires a precondition the user has not met
    #[error("{0}")]
    InvalidState(String),

    /// External API failure surfaced to the caller
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) | ApiError::Validation(msg) | ApiError::InvalidState(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            ApiError::Upstream(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// An absent or expired remember token is NOT represented here — the
/// session read path answers "not authenticated", never an error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::StorageUnavailable(m) => {
                (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable", m.as_str())
            }
            AppError::Storage(m) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_failure", m.as_str())
            }
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error",
            ),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<gatehouse_core::auth::AuthError> for AppError {
    fn from(e: gatehouse_core::auth::AuthError) -> Self {
        use gatehouse_core::auth::AuthError;
        match e {
            AuthError::Validation(msg) => AppError::Validation(msg),
            AuthError::StorageUnavailable(msg) => AppError::StorageUnavailable(msg),
            AuthError::Storage(e) => AppError::Storage(e.to_string()),
            AuthError::Migrate(e) => AppError::Storage(e.to_string()),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use faker_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from the identity core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error kind to an HTTP status, error code and message.
///
/// Infrastructure failures are logged here and answered with a generic
/// message; every other kind carries its own display text.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),

        CoreError::InvalidCredentials
        | CoreError::UnconfirmedEmail
        | CoreError::ExpiredSession
        | CoreError::InvalidSession
        | CoreError::InvalidToken
        | CoreError::ExpiredToken => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string()),

        CoreError::RequestLimitExceeded => (
            StatusCode::FORBIDDEN,
            "REQUEST_LIMIT_EXCEEDED",
            err.to_string(),
        ),

        CoreError::AlreadyExists(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),

        CoreError::InvalidCode
        | CoreError::ExpiredCode
        | CoreError::InvalidCurrentPassword
        | CoreError::UnverifiedPasswordReset => {
            (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string())
        }
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),

        CoreError::Unavailable(msg) => {
            tracing::error!(error = %msg, "Backing store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Service temporarily unavailable".to_string(),
            )
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

//! Translation of `sqlx` failures into domain error kinds.

use faker_core::error::CoreError;

/// Postgres SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Classify a sqlx error into a [`CoreError`].
///
/// - `RowNotFound` maps to `NotFound`.
/// - Unique constraint violations (constraint name starting with `uq_`) map to
///   `AlreadyExists`.
/// - Pool exhaustion and I/O failures map to `Unavailable`.
/// - Everything else maps to `Internal` with a sanitized message.
pub fn classify_sqlx_error(err: sqlx::Error, entity: &'static str) -> CoreError {
    match err {
        sqlx::Error::RowNotFound => CoreError::not_found(entity),
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return CoreError::AlreadyExists(duplicate_message(constraint));
                }
            }
            tracing::error!(error = %db_err, "Database error");
            CoreError::Internal("Database error".to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::error!(error = %err, "Database unavailable");
            CoreError::Unavailable("Database unavailable".to_string())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            CoreError::Internal("Database error".to_string())
        }
    }
}

fn duplicate_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "User with this email already exists".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

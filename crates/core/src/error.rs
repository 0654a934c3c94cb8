/// Domain error kinds shared by every store adapter and the coordinator.
///
/// Store adapters translate their native failures into these kinds at their
/// boundary; the transport layer maps them to user-facing responses.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid login or password")]
    InvalidCredentials,

    #[error("Session is expired")]
    ExpiredSession,

    #[error("Session is invalid")]
    InvalidSession,

    #[error("Unconfirmed email")]
    UnconfirmedEmail,

    #[error("Code is expired, try one more time")]
    ExpiredCode,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Unverified password reset")]
    UnverifiedPasswordReset,

    #[error("Invalid current password")]
    InvalidCurrentPassword,

    #[error("Requests limit for today has been reached")]
    RequestLimitExceeded,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token is expired")]
    ExpiredToken,

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A backing store could not be reached or did not answer in time.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str) -> Self {
        CoreError::NotFound { entity }
    }
}

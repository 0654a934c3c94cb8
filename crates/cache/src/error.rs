use std::time::Duration;

use faker_core::error::CoreError;

/// Failures of the ephemeral key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection-level or command failure reported by Redis.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The store did not answer within the configured deadline.
    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),

    /// A stored value could not be interpreted (e.g. non-integer counter).
    #[error("Invalid stored value: {0}")]
    InvalidValue(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidValue(msg) => CoreError::Internal(msg),
            other => CoreError::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn timeouts_surface_as_unavailable() {
        let err: CoreError = StoreError::Timeout(Duration::from_millis(500)).into();
        assert_matches!(err, CoreError::Unavailable(msg) if msg.contains("timed out"));
    }

    #[test]
    fn invalid_values_surface_as_internal() {
        let err: CoreError = StoreError::InvalidValue("counter".into()).into();
        assert_matches!(err, CoreError::Internal(_));
    }
}

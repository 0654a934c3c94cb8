//! Revoked access-token identifiers.

use std::sync::Arc;
use std::time::Duration;

use faker_core::error::CoreError;
use uuid::Uuid;

use crate::store::EphemeralStore;

const KEY_PREFIX: &str = "api:inv_token_id";

/// Presence marker stored under a revoked token id.
const REVOKED_MARKER: &str = "1";

/// Set of token ids that must be rejected even while cryptographically valid.
///
/// Entries live exactly as long as the tokens they revoke could; a store
/// failure on lookup is an error, never "not revoked".
#[derive(Clone)]
pub struct RevocationList {
    store: Arc<dyn EphemeralStore>,
}

impl RevocationList {
    pub fn new(store: Arc<dyn EphemeralStore>) -> Self {
        Self { store }
    }

    fn key(token_id: Uuid) -> String {
        format!("{KEY_PREFIX}:{token_id}")
    }

    /// Mark `token_id` revoked for `ttl`.
    ///
    /// A zero `ttl` means the token has already expired; nothing is written.
    pub async fn add_token(&self, token_id: Uuid, ttl: Duration) -> Result<(), CoreError> {
        if ttl.is_zero() {
            tracing::debug!(%token_id, "Skipping revocation of already-expired token");
            return Ok(());
        }
        self.store
            .set_with_ttl(&Self::key(token_id), REVOKED_MARKER, ttl)
            .await?;
        tracing::debug!(%token_id, ttl_secs = ttl.as_secs(), "Token revoked");
        Ok(())
    }

    /// `Ok(())` if `token_id` is not revoked, [`CoreError::InvalidToken`] if it is.
    pub async fn check_token(&self, token_id: Uuid) -> Result<(), CoreError> {
        match self.store.get(&Self::key(token_id)).await {
            Ok(None) => Ok(()),
            Ok(Some(_)) => Err(CoreError::InvalidToken),
            Err(e) => {
                tracing::error!(%token_id, error = %e, "Revocation lookup failed");
                Err(e.into())
            }
        }
    }
}

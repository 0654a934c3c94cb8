//! Short-lived verification codes keyed by purpose and email.

use std::sync::Arc;
use std::time::Duration;

use faker_core::error::CoreError;
use faker_core::verification::CodePurpose;

use crate::store::EphemeralStore;

#[derive(Clone)]
pub struct VerificationCodeStore {
    store: Arc<dyn EphemeralStore>,
}

impl VerificationCodeStore {
    pub fn new(store: Arc<dyn EphemeralStore>) -> Self {
        Self { store }
    }

    /// Store `code` for `email`, replacing any previous one for the same purpose.
    pub async fn set_code(
        &self,
        purpose: CodePurpose,
        email: &str,
        code: &str,
        ttl: Duration,
    ) -> Result<(), CoreError> {
        self.store.set_with_ttl(&purpose.key(email), code, ttl).await?;
        Ok(())
    }

    /// The live code for `email`. Absent or expired codes are `NotFound`.
    pub async fn get_code(&self, purpose: CodePurpose, email: &str) -> Result<String, CoreError> {
        self.store
            .get(&purpose.key(email))
            .await?
            .ok_or_else(|| CoreError::not_found("Verification code"))
    }

    pub async fn delete(&self, purpose: CodePurpose, email: &str) -> Result<(), CoreError> {
        self.store.delete(&purpose.key(email)).await?;
        Ok(())
    }
}

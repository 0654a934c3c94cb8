//! Outbound email seam.

use async_trait::async_trait;

use crate::error::CoreError;

/// Email subjects used by the identity flows.
pub mod subjects {
    pub const CONFIRM_EMAIL: &str = "Confirm your email";
    pub const PASSWORD_RESET: &str = "Password reset";
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_email(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), CoreError>;
}

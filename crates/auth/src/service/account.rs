//! Account lifecycle: sign-up, email confirmation, password reset and
//! credential maintenance.

use faker_core::error::CoreError;
use faker_core::notify::subjects;
use faker_core::types::DbId;
use faker_core::user::{NewUser, Role, User};
use faker_core::verification::{CodePurpose, VERIFIED_SENTINEL};

use super::AuthCoordinator;
use crate::codes::{generate_external_credential, generate_numeric_code};
use crate::password::validate_password_strength;
use crate::templates;

#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub receive_notification: bool,
}

impl AuthCoordinator {
    /// Register an unconfirmed user on the default plan and email them a
    /// confirmation code.
    pub async fn sign_up(&self, input: SignUpInput) -> Result<User, CoreError> {
        validate_password_strength(&input.password)?;

        let password_hash = self.hasher.hash(&input.password)?;
        let plan = self.plans.get_one_by_default_name().await?;

        let user = self
            .users
            .create(NewUser {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password_hash,
                role: Role::Basic,
                receive_notification: input.receive_notification,
                plan_id: plan.id,
                external_credential: generate_external_credential(),
            })
            .await?;
        tracing::info!(user_id = user.id, plan_id = plan.id, "User signed up");

        let code = generate_numeric_code();
        self.codes
            .set_code(
                CodePurpose::EmailConfirmation,
                &user.email,
                &code,
                self.verification_code_ttl,
            )
            .await?;

        let body =
            templates::confirm_email_body(&user.display_name(), &code, self.verification_code_ttl);
        self.notifier
            .send_email(std::slice::from_ref(&user.email), subjects::CONFIRM_EMAIL, &body)
            .await?;

        Ok(user)
    }

    /// Mark the account confirmed if `code` matches the live confirmation code.
    pub async fn confirm_user_email(&self, email: &str, code: &str) -> Result<(), CoreError> {
        let stored = self.live_code(CodePurpose::EmailConfirmation, email).await?;
        if stored != code {
            return Err(CoreError::InvalidCode);
        }

        let mut user = self.users.get_by_email(email).await?;
        user.is_confirmed = true;
        self.users.update(&user).await?;

        // Best effort: an unconsumed code expires on its own.
        if let Err(e) = self.codes.delete(CodePurpose::EmailConfirmation, email).await {
            tracing::warn!(user_id = user.id, error = %e, "Failed to discard confirmation code");
        }

        tracing::info!(user_id = user.id, "Email confirmed");
        Ok(())
    }

    /// Email a password-reset code to the account owner.
    pub async fn password_reset_request(&self, email: &str) -> Result<(), CoreError> {
        let user = self.users.get_by_email(email).await?;

        let code = generate_numeric_code();
        self.codes
            .set_code(CodePurpose::PasswordReset, email, &code, self.verification_code_ttl)
            .await?;

        let body =
            templates::password_reset_body(&user.display_name(), &code, self.verification_code_ttl);
        self.notifier
            .send_email(std::slice::from_ref(&user.email), subjects::PASSWORD_RESET, &body)
            .await?;

        tracing::info!(user_id = user.id, "Password reset requested");
        Ok(())
    }

    /// Check a reset code. On a match the code is replaced by a marker that
    /// unlocks [`password_reset`](Self::password_reset) for a fresh window.
    pub async fn verify_password_reset(&self, email: &str, code: &str) -> Result<(), CoreError> {
        let stored = self.live_code(CodePurpose::PasswordReset, email).await?;
        if stored != code {
            return Err(CoreError::InvalidCode);
        }

        self.codes
            .set_code(
                CodePurpose::PasswordReset,
                email,
                VERIFIED_SENTINEL,
                self.verification_code_ttl,
            )
            .await
    }

    /// Set a new password after a successful
    /// [`verify_password_reset`](Self::verify_password_reset). The
    /// verification is consumed.
    pub async fn password_reset(&self, email: &str, new_password: &str) -> Result<(), CoreError> {
        let stored = self.live_code(CodePurpose::PasswordReset, email).await?;
        if stored != VERIFIED_SENTINEL {
            return Err(CoreError::UnverifiedPasswordReset);
        }

        validate_password_strength(new_password)?;

        let mut user = self.users.get_by_email(email).await?;
        user.password_hash = self.hasher.hash(new_password)?;
        self.users.update(&user).await?;

        self.codes.delete(CodePurpose::PasswordReset, email).await?;

        tracing::info!(user_id = user.id, "Password reset");
        Ok(())
    }

    pub async fn change_password(
        &self,
        user_id: DbId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), CoreError> {
        let mut user = self.users.get_by_id(user_id).await?;
        if !self.hasher.verify(current_password, &user.password_hash)? {
            return Err(CoreError::InvalidCurrentPassword);
        }

        validate_password_strength(new_password)?;

        user.password_hash = self.hasher.hash(new_password)?;
        self.users.update(&user).await?;

        tracing::info!(user_id, "Password changed");
        Ok(())
    }

    /// Replace the user's external credential; the old one stops resolving.
    pub async fn regenerate_external_credential(&self, user_id: DbId) -> Result<User, CoreError> {
        let mut user = self.users.get_by_id(user_id).await?;
        user.external_credential = generate_external_credential();
        let user = self.users.update(&user).await?;

        tracing::info!(user_id, "External credential regenerated");
        Ok(user)
    }

    /// Change the user's first and/or last name. `None` leaves a name as it is.
    pub async fn update_profile(
        &self,
        user_id: DbId,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<User, CoreError> {
        let mut user = self.users.get_by_id(user_id).await?;
        if let Some(first_name) = first_name {
            user.first_name = non_blank("First name", first_name)?;
        }
        if let Some(last_name) = last_name {
            user.last_name = non_blank("Last name", last_name)?;
        }
        let user = self.users.update(&user).await?;

        tracing::info!(user_id, "Profile updated");
        Ok(user)
    }

    pub async fn set_receive_notification(
        &self,
        user_id: DbId,
        receive_notification: bool,
    ) -> Result<User, CoreError> {
        let mut user = self.users.get_by_id(user_id).await?;
        user.receive_notification = receive_notification;
        let user = self.users.update(&user).await?;

        tracing::info!(user_id, receive_notification, "Notification preference changed");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: DbId) -> Result<User, CoreError> {
        self.users.get_by_id(user_id).await
    }

    /// The stored value for `purpose`/`email`, with a missing value reported
    /// as an expired code.
    async fn live_code(&self, purpose: CodePurpose, email: &str) -> Result<String, CoreError> {
        match self.codes.get_code(purpose, email).await {
            Err(CoreError::NotFound { .. }) => Err(CoreError::ExpiredCode),
            other => other,
        }
    }
}

fn non_blank(field: &str, value: String) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

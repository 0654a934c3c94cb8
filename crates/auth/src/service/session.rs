//! Sign-in, refresh, sign-out and per-request credential validation.

use chrono::Utc;
use faker_core::error::CoreError;
use faker_core::session::Session;
use faker_core::token::{AuthContext, TokenPair};
use faker_core::types::DbId;
use faker_core::user::User;
use uuid::Uuid;

use super::AuthCoordinator;
use crate::jwt::{generate_refresh_token, hash_refresh_token};

#[derive(Debug, Clone)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
    /// Free-form client description, typically the `User-Agent`.
    pub client: String,
    pub ip_address: String,
}

impl AuthCoordinator {
    /// Authenticate by email and password and open a new session.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller; store failures are not collapsed into `InvalidCredentials`.
    pub async fn sign_in(&self, input: SignInInput) -> Result<(TokenPair, User), CoreError> {
        let user = match self.users.get_by_email(&input.email).await {
            Ok(user) => user,
            Err(CoreError::NotFound { .. }) => {
                self.hasher.verify_dummy(&input.password)?;
                return Err(CoreError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !self.hasher.verify(&input.password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "Sign-in rejected: wrong password");
            return Err(CoreError::InvalidCredentials);
        }

        if !user.is_confirmed {
            return Err(CoreError::UnconfirmedEmail);
        }

        let tokens = self
            .create_session(&user, input.client, input.ip_address)
            .await?;
        Ok((tokens, user))
    }

    async fn create_session(
        &self,
        user: &User,
        client: String,
        ip_address: String,
    ) -> Result<TokenPair, CoreError> {
        let session_id = Uuid::new_v4();
        let token_id = Uuid::new_v4();

        let access_token = self.tokens.generate_access_token(
            user.id,
            user.plan_id,
            session_id,
            token_id,
            self.access_token_ttl,
        )?;
        let refresh_token = generate_refresh_token();

        let now = Utc::now();
        let session = Session {
            id: session_id,
            user_id: user.id,
            refresh_token_hash: hash_refresh_token(&refresh_token),
            client,
            ip_address,
            created_at: now,
            expires_at: now + chrono::Duration::from_std(self.refresh_token_ttl)
                .map_err(|e| CoreError::Internal(format!("Refresh token TTL out of range: {e}")))?,
        };
        self.sessions.set_session(user.id, &session).await?;

        tracing::info!(user_id = user.id, %session_id, "Session created");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The session keeps its id and original expiry but gets a rotated
    /// refresh token, so each refresh token works exactly once.
    pub async fn refresh_token(
        &self,
        user_id: DbId,
        refresh_token: &str,
    ) -> Result<TokenPair, CoreError> {
        let hash = hash_refresh_token(refresh_token);
        let session = match self
            .sessions
            .get_session_by_refresh_token(user_id, &hash)
            .await
        {
            Ok(session) => session,
            Err(CoreError::NotFound { .. }) => return Err(CoreError::InvalidSession),
            Err(e) => return Err(e),
        };

        let user = self.users.get_by_id(user_id).await?;

        if !self
            .sessions
            .claim_session(user_id, session.id, &hash)
            .await?
        {
            tracing::info!(user_id, session_id = %session.id, "Refresh rejected: token already used");
            return Err(CoreError::InvalidSession);
        }

        if session.is_expired_at(Utc::now()) {
            tracing::info!(user_id, session_id = %session.id, "Refresh rejected: session expired");
            return Err(CoreError::ExpiredSession);
        }

        let token_id = Uuid::new_v4();
        let access_token = self.tokens.generate_access_token(
            user.id,
            user.plan_id,
            session.id,
            token_id,
            self.access_token_ttl,
        )?;

        let rotated = generate_refresh_token();
        let renewed = Session {
            refresh_token_hash: hash_refresh_token(&rotated),
            ..session
        };
        self.sessions.set_session(user_id, &renewed).await?;

        tracing::debug!(user_id, session_id = %renewed.id, "Session refreshed");
        Ok(TokenPair {
            access_token,
            refresh_token: rotated,
        })
    }

    /// End the caller's session and revoke the access token they presented.
    pub async fn sign_out(&self, ctx: &AuthContext) -> Result<(), CoreError> {
        self.sessions
            .remove_session(ctx.user_id, ctx.session_id)
            .await?;
        self.revocations
            .add_token(ctx.token_id, self.access_token_ttl)
            .await?;

        tracing::info!(
            user_id = ctx.user_id,
            session_id = %ctx.session_id,
            token_id = %ctx.token_id,
            "Signed out"
        );
        Ok(())
    }

    /// Resolve a bearer access token into the caller's identity.
    ///
    /// Session presence is not re-checked; a signed-out token is rejected by
    /// the revocation list instead.
    pub async fn validate_token(&self, access_token: &str) -> Result<AuthContext, CoreError> {
        let claims = self.tokens.parse(access_token)?;

        let user = match self.users.get_by_id(claims.user_id).await {
            Ok(user) => user,
            Err(CoreError::NotFound { .. }) => return Err(CoreError::InvalidToken),
            Err(e) => return Err(e),
        };

        if !user.is_confirmed {
            return Err(CoreError::UnconfirmedEmail);
        }

        self.revocations.check_token(claims.token_id).await?;

        Ok(AuthContext::from_claims(&claims, user.role))
    }

    /// Resolve an external credential to the owning user's id.
    pub async fn validate_external_token(&self, credential: &str) -> Result<DbId, CoreError> {
        let user = match self.users.get_by_external_credential(credential).await {
            Ok(user) => user,
            Err(CoreError::NotFound { .. }) => return Err(CoreError::InvalidToken),
            Err(e) => return Err(e),
        };

        if !user.is_confirmed {
            return Err(CoreError::UnconfirmedEmail);
        }

        Ok(user.id)
    }
}

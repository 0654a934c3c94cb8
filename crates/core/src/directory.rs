//! Durable user and session store seams.
//!
//! Implementations translate their native failures at the boundary: a missing
//! row becomes [`CoreError::NotFound`], a unique-constraint violation becomes
//! [`CoreError::AlreadyExists`], everything else passes through as
//! `Unavailable` or `Internal`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreError;
use crate::session::Session;
use crate::types::DbId;
use crate::user::{NewUser, User};

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_by_id(&self, id: DbId) -> Result<User, CoreError>;

    async fn get_by_email(&self, email: &str) -> Result<User, CoreError>;

    async fn get_by_external_credential(&self, credential: &str) -> Result<User, CoreError>;

    /// Insert a new user. Fails with `AlreadyExists` when the email is taken.
    async fn create(&self, input: NewUser) -> Result<User, CoreError>;

    /// Persist the mutable fields of `user` (names, confirmation flag,
    /// password hash, plan, notification preference, external credential).
    async fn update(&self, user: &User) -> Result<User, CoreError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Upsert `session` by id and bump the owner's last-visit timestamp.
    ///
    /// Must be atomic per session: concurrent calls for the same user never
    /// lose one another's inserts.
    async fn set_session(&self, user_id: DbId, session: &Session) -> Result<(), CoreError>;

    async fn get_session_by_refresh_token(
        &self,
        user_id: DbId,
        refresh_token_hash: &str,
    ) -> Result<Session, CoreError>;

    /// Delete the session only if it still carries `refresh_token_hash`.
    ///
    /// Returns `false` when the session is gone or its token has already
    /// been rotated. Check and delete happen as one step, so of two callers
    /// holding the same token at most one gets `true`.
    async fn claim_session(
        &self,
        user_id: DbId,
        session_id: Uuid,
        refresh_token_hash: &str,
    ) -> Result<bool, CoreError>;

    /// Idempotent: removing a missing session is not an error.
    async fn remove_session(&self, user_id: DbId, session_id: Uuid) -> Result<(), CoreError>;
}

use faker_core::session::Session;
use faker_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: Uuid,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub client: String,
    pub ip_address: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl From<UserSession> for Session {
    fn from(row: UserSession) -> Self {
        Session {
            id: row.id,
            user_id: row.user_id,
            refresh_token_hash: row.refresh_token_hash,
            client: row.client,
            ip_address: row.ip_address,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

/// Result of [`SessionRepo::upsert`](crate::repositories::SessionRepo::upsert).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpsert {
    Stored,
    /// The owning user does not exist; nothing was written.
    UnknownUser,
    /// The session id is already taken by another user; nothing was written.
    ForeignSession,
}

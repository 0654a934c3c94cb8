//! Login sessions.

use uuid::Uuid;

use crate::types::{DbId, Timestamp};

/// One authenticated login instance for a user.
///
/// The refresh token itself is never stored; `refresh_token_hash` is its
/// SHA-256 hex digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub client: String,
    pub ip_address: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Session {
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }
}

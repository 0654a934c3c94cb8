//! Access-credential payloads and the explicit per-request identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DbId;
use crate::user::Role;

/// JWT claims embedded in every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: DbId,
    pub session_id: Uuid,
    /// Fresh per issuance; the only identifier the revocation list knows.
    pub token_id: Uuid,
    pub plan_id: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Access/refresh pair handed to the client after sign-in or refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Identity of the authenticated caller, passed explicitly into every
/// operation that acts on their behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: DbId,
    pub role: Role,
    pub session_id: Uuid,
    pub token_id: Uuid,
    pub plan_id: DbId,
}

impl AuthContext {
    pub fn from_claims(claims: &Claims, role: Role) -> Self {
        Self {
            user_id: claims.user_id,
            role,
            session_id: claims.session_id,
            token_id: claims.token_id,
            plan_id: claims.plan_id,
        }
    }
}

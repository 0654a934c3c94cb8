use faker_core::error::CoreError;
use faker_core::types::{DbId, Timestamp};
use faker_core::user::{Role, User};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash and the external credential -- never log or
/// serialize this directly.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub receive_notification: bool,
    pub is_confirmed: bool,
    pub plan_id: DbId,
    pub external_credential: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub last_visit_at: Timestamp,
}

impl TryFrom<UserRow> for User {
    type Error = CoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            role: Role::try_from(row.role.as_str())?,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password_hash,
            receive_notification: row.receive_notification,
            is_confirmed: row.is_confirmed,
            plan_id: row.plan_id,
            external_credential: row.external_credential,
            created_at: row.created_at,
            updated_at: row.updated_at,
            last_visit_at: row.last_visit_at,
        })
    }
}

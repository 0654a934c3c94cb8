//! User aggregate as consumed by the identity core.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Role names stored in `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Basic,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Basic => "basic",
            Role::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "basic" => Ok(Role::Basic),
            "admin" => Ok(Role::Admin),
            other => Err(CoreError::Internal(format!("Unknown role '{other}'"))),
        }
    }
}

/// Full user record.
///
/// Contains the password hash and the external credential -- never serialize
/// this to API responses directly.
#[derive(Debug, Clone)]
pub struct User {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub receive_notification: bool,
    pub is_confirmed: bool,
    pub plan_id: DbId,
    /// Opaque external-access credential. Only the latest value resolves.
    pub external_credential: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub last_visit_at: Timestamp,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// "First Last" with each word capitalised, used in email greetings.
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }
}

/// Title-case `first` and `last` into a single greeting name.
pub fn display_name(first: &str, last: &str) -> String {
    format!("{first} {last}")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub receive_notification: bool,
    pub plan_id: DbId,
    pub external_credential: String,
}

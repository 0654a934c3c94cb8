//! Repository for the `users` table.

use faker_core::types::DbId;
use faker_core::user::{NewUser, User};
use sqlx::PgPool;

use crate::models::user::UserRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, email, password_hash, role, \
                        receive_notification, is_confirmed, plan_id, external_credential, \
                        created_at, updated_at, last_visit_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (first_name, last_name, email, password_hash, role,
                                receive_notification, plan_id, external_credential)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .bind(input.receive_notification)
            .bind(input.plan_id)
            .bind(&input.external_credential)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_external_credential(
        pool: &PgPool,
        credential: &str,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE external_credential = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(credential)
            .fetch_optional(pool)
            .await
    }

    /// Write back every mutable field of `user`. Email and timestamps other
    /// than `updated_at` are left untouched.
    ///
    /// Returns `None` if no row with `user.id` exists.
    pub async fn update(pool: &PgPool, user: &User) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                first_name = $2,
                last_name = $3,
                password_hash = $4,
                role = $5,
                receive_notification = $6,
                is_confirmed = $7,
                plan_id = $8,
                external_credential = $9,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.receive_notification)
            .bind(user.is_confirmed)
            .bind(user.plan_id)
            .bind(&user.external_credential)
            .fetch_optional(pool)
            .await
    }
}

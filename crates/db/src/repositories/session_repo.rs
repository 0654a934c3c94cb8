//! Repository for the `user_sessions` table.

use faker_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::session::{SessionUpsert, UserSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, refresh_token_hash, client, ip_address, created_at, expires_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Insert `session`, or replace the row with the same id, and bump the
    /// owner's `last_visit_at` in the same transaction.
    ///
    /// An existing row is only replaced when it belongs to the same user.
    pub async fn upsert(pool: &PgPool, session: &UserSession) -> Result<SessionUpsert, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let touched = sqlx::query("UPDATE users SET last_visit_at = NOW() WHERE id = $1")
            .bind(session.user_id)
            .execute(&mut *tx)
            .await?;
        if touched.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(SessionUpsert::UnknownUser);
        }

        let stored = sqlx::query(
            "INSERT INTO user_sessions
                (id, user_id, refresh_token_hash, client, ip_address, created_at, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (id) DO UPDATE SET
                refresh_token_hash = EXCLUDED.refresh_token_hash,
                client = EXCLUDED.client,
                ip_address = EXCLUDED.ip_address,
                expires_at = EXCLUDED.expires_at
             WHERE user_sessions.user_id = EXCLUDED.user_id",
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(&session.refresh_token_hash)
        .bind(&session.client)
        .bind(&session.ip_address)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&mut *tx)
        .await?;
        if stored.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(SessionUpsert::ForeignSession);
        }

        tx.commit().await?;
        Ok(SessionUpsert::Stored)
    }

    /// Find a user's session by the SHA-256 digest of its refresh token.
    ///
    /// Expired sessions are returned as-is; expiry is the caller's decision.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        user_id: DbId,
        hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE user_id = $1 AND refresh_token_hash = $2"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Delete one session if its refresh token digest still matches.
    /// Returns `true` if a row was removed.
    pub async fn delete_by_refresh_token_hash(
        pool: &PgPool,
        user_id: DbId,
        id: Uuid,
        hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_sessions
             WHERE id = $1 AND user_id = $2 AND refresh_token_hash = $3",
        )
        .bind(id)
        .bind(user_id)
        .bind(hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete one session. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

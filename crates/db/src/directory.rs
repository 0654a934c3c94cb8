//! Postgres implementations of the `faker_core` store seams.

use async_trait::async_trait;
use faker_core::directory::{SessionStore, UserDirectory};
use faker_core::error::CoreError;
use faker_core::plan::{Plan, PlanCatalog, BASIC_PLAN_NAME};
use faker_core::session::Session;
use faker_core::types::DbId;
use faker_core::user::{NewUser, User};
use uuid::Uuid;

use crate::error::classify_sqlx_error;
use crate::models::session::{SessionUpsert, UserSession};
use crate::repositories::{PlanRepo, SessionRepo, UserRepo};
use crate::DbPool;

/// Users and their sessions, backed by the `users` and `user_sessions` tables.
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: DbPool,
}

impl PgUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn user_err(err: sqlx::Error) -> CoreError {
    classify_sqlx_error(err, "User")
}

fn session_err(err: sqlx::Error) -> CoreError {
    classify_sqlx_error(err, "Session")
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn get_by_id(&self, id: DbId) -> Result<User, CoreError> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(user_err)?
            .ok_or(CoreError::not_found("User"))?
            .try_into()
    }

    async fn get_by_email(&self, email: &str) -> Result<User, CoreError> {
        UserRepo::find_by_email(&self.pool, email)
            .await
            .map_err(user_err)?
            .ok_or(CoreError::not_found("User"))?
            .try_into()
    }

    async fn get_by_external_credential(&self, credential: &str) -> Result<User, CoreError> {
        UserRepo::find_by_external_credential(&self.pool, credential)
            .await
            .map_err(user_err)?
            .ok_or(CoreError::not_found("User"))?
            .try_into()
    }

    async fn create(&self, input: NewUser) -> Result<User, CoreError> {
        UserRepo::create(&self.pool, &input)
            .await
            .map_err(user_err)?
            .try_into()
    }

    async fn update(&self, user: &User) -> Result<User, CoreError> {
        UserRepo::update(&self.pool, user)
            .await
            .map_err(user_err)?
            .ok_or(CoreError::not_found("User"))?
            .try_into()
    }
}

#[async_trait]
impl SessionStore for PgUserDirectory {
    async fn set_session(&self, user_id: DbId, session: &Session) -> Result<(), CoreError> {
        let row = UserSession {
            id: session.id,
            user_id,
            refresh_token_hash: session.refresh_token_hash.clone(),
            client: session.client.clone(),
            ip_address: session.ip_address.clone(),
            created_at: session.created_at,
            expires_at: session.expires_at,
        };

        match SessionRepo::upsert(&self.pool, &row).await.map_err(session_err)? {
            SessionUpsert::Stored => Ok(()),
            SessionUpsert::UnknownUser => Err(CoreError::not_found("User")),
            SessionUpsert::ForeignSession => {
                tracing::error!(user_id, session_id = %session.id, "Session id already owned by another user");
                Err(CoreError::Internal("Session id collision".to_string()))
            }
        }
    }

    async fn get_session_by_refresh_token(
        &self,
        user_id: DbId,
        refresh_token_hash: &str,
    ) -> Result<Session, CoreError> {
        SessionRepo::find_by_refresh_token_hash(&self.pool, user_id, refresh_token_hash)
            .await
            .map_err(session_err)?
            .map(Session::from)
            .ok_or(CoreError::not_found("Session"))
    }

    async fn claim_session(
        &self,
        user_id: DbId,
        session_id: Uuid,
        refresh_token_hash: &str,
    ) -> Result<bool, CoreError> {
        SessionRepo::delete_by_refresh_token_hash(
            &self.pool,
            user_id,
            session_id,
            refresh_token_hash,
        )
        .await
        .map_err(session_err)
    }

    async fn remove_session(&self, user_id: DbId, session_id: Uuid) -> Result<(), CoreError> {
        let removed = SessionRepo::delete(&self.pool, user_id, session_id)
            .await
            .map_err(session_err)?;
        if !removed {
            tracing::debug!(user_id, %session_id, "Session already removed");
        }
        Ok(())
    }
}

/// Read-only plan catalog backed by the `plans` table.
#[derive(Clone)]
pub struct PgPlanCatalog {
    pool: DbPool,
}

impl PgPlanCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanCatalog for PgPlanCatalog {
    async fn get_one(&self, plan_id: DbId) -> Result<Plan, CoreError> {
        PlanRepo::find_by_id(&self.pool, plan_id)
            .await
            .map_err(|e| classify_sqlx_error(e, "Plan"))?
            .map(Plan::from)
            .ok_or(CoreError::not_found("Plan"))
    }

    async fn get_one_by_default_name(&self) -> Result<Plan, CoreError> {
        PlanRepo::find_by_name(&self.pool, BASIC_PLAN_NAME)
            .await
            .map_err(|e| classify_sqlx_error(e, "Plan"))?
            .map(Plan::from)
            .ok_or(CoreError::not_found("Plan"))
    }
}

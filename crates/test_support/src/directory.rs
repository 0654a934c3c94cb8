use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use faker_core::directory::{SessionStore, UserDirectory};
use faker_core::error::CoreError;
use faker_core::session::Session;
use faker_core::types::DbId;
use faker_core::user::{NewUser, User};
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    next_id: DbId,
    users: HashMap<DbId, User>,
    sessions: HashMap<Uuid, Session>,
}

/// Users and sessions in a `HashMap`, with the same uniqueness rules as the
/// Postgres schema (email and external credential).
#[derive(Default)]
pub struct MemoryDirectory {
    inner: Mutex<Inner>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of live sessions owned by `user_id`.
    pub fn session_count(&self, user_id: DbId) -> usize {
        self.lock()
            .sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .count()
    }

    pub fn session(&self, session_id: Uuid) -> Option<Session> {
        self.lock().sessions.get(&session_id).cloned()
    }

    /// Overwrite a stored session directly, e.g. to backdate its expiry.
    pub fn put_session(&self, session: Session) {
        self.lock().sessions.insert(session.id, session);
    }
}

fn find_user<'a>(
    inner: &'a Inner,
    pred: impl Fn(&User) -> bool,
) -> Result<&'a User, CoreError> {
    inner
        .users
        .values()
        .find(|u| pred(u))
        .ok_or(CoreError::not_found("User"))
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn get_by_id(&self, id: DbId) -> Result<User, CoreError> {
        self.lock()
            .users
            .get(&id)
            .cloned()
            .ok_or(CoreError::not_found("User"))
    }

    async fn get_by_email(&self, email: &str) -> Result<User, CoreError> {
        find_user(&self.lock(), |u| u.email == email).cloned()
    }

    async fn get_by_external_credential(&self, credential: &str) -> Result<User, CoreError> {
        find_user(&self.lock(), |u| u.external_credential == credential).cloned()
    }

    async fn create(&self, input: NewUser) -> Result<User, CoreError> {
        let mut inner = self.lock();
        if inner.users.values().any(|u| u.email == input.email) {
            return Err(CoreError::AlreadyExists(
                "User with this email already exists".to_string(),
            ));
        }
        if inner
            .users
            .values()
            .any(|u| u.external_credential == input.external_credential)
        {
            return Err(CoreError::AlreadyExists(
                "Duplicate value violates unique constraint: uq_users_external_credential"
                    .to_string(),
            ));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.next_id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            receive_notification: input.receive_notification,
            is_confirmed: false,
            plan_id: input.plan_id,
            external_credential: input.external_credential,
            created_at: now,
            updated_at: now,
            last_visit_at: now,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, CoreError> {
        let mut inner = self.lock();
        let stored = inner
            .users
            .get_mut(&user.id)
            .ok_or(CoreError::not_found("User"))?;
        let email = stored.email.clone();
        let created_at = stored.created_at;
        let last_visit_at = stored.last_visit_at;
        *stored = User {
            email,
            created_at,
            last_visit_at,
            updated_at: Utc::now(),
            ..user.clone()
        };
        Ok(stored.clone())
    }
}

#[async_trait]
impl SessionStore for MemoryDirectory {
    async fn set_session(&self, user_id: DbId, session: &Session) -> Result<(), CoreError> {
        let mut inner = self.lock();
        if inner
            .sessions
            .get(&session.id)
            .is_some_and(|s| s.user_id != user_id)
        {
            return Err(CoreError::Internal("Session id collision".to_string()));
        }
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or(CoreError::not_found("User"))?;
        user.last_visit_at = Utc::now();

        inner.sessions.insert(
            session.id,
            Session {
                user_id,
                ..session.clone()
            },
        );
        Ok(())
    }

    async fn get_session_by_refresh_token(
        &self,
        user_id: DbId,
        refresh_token_hash: &str,
    ) -> Result<Session, CoreError> {
        self.lock()
            .sessions
            .values()
            .find(|s| s.user_id == user_id && s.refresh_token_hash == refresh_token_hash)
            .cloned()
            .ok_or(CoreError::not_found("Session"))
    }

    async fn claim_session(
        &self,
        user_id: DbId,
        session_id: Uuid,
        refresh_token_hash: &str,
    ) -> Result<bool, CoreError> {
        let mut inner = self.lock();
        let matches = inner.sessions.get(&session_id).is_some_and(|s| {
            s.user_id == user_id && s.refresh_token_hash == refresh_token_hash
        });
        if matches {
            inner.sessions.remove(&session_id);
        }
        Ok(matches)
    }

    async fn remove_session(&self, user_id: DbId, session_id: Uuid) -> Result<(), CoreError> {
        let mut inner = self.lock();
        if inner
            .sessions
            .get(&session_id)
            .is_some_and(|s| s.user_id == user_id)
        {
            inner.sessions.remove(&session_id);
        }
        Ok(())
    }
}

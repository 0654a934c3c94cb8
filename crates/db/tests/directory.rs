//! Integration tests for the Postgres user directory, session store and plan
//! catalog. Each test runs against a freshly migrated database.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use faker_core::directory::{SessionStore, UserDirectory};
use faker_core::error::CoreError;
use faker_core::plan::{PlanCatalog, BASIC_PLAN_NAME};
use faker_core::session::Session;
use faker_core::types::DbId;
use faker_core::user::{NewUser, Role};
use faker_db::{PgPlanCatalog, PgUserDirectory};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn basic_plan_id(pool: &PgPool) -> DbId {
    PgPlanCatalog::new(pool.clone())
        .get_one_by_default_name()
        .await
        .unwrap()
        .id
}

async fn session_count(pool: &PgPool, user_id: DbId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

fn new_user(email: &str, plan_id: DbId) -> NewUser {
    NewUser {
        first_name: "ada".to_string(),
        last_name: "lovelace".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        role: Role::Basic,
        receive_notification: true,
        plan_id,
        external_credential: format!("cred-{email}"),
    }
}

fn new_session(user_id: DbId, refresh_token_hash: &str) -> Session {
    let now = Utc::now();
    Session {
        id: Uuid::new_v4(),
        user_id,
        refresh_token_hash: refresh_token_hash.to_string(),
        client: "integration-test".to_string(),
        ip_address: "127.0.0.1".to_string(),
        created_at: now,
        expires_at: now + Duration::days(30),
    }
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_basic_plan_is_seeded(pool: PgPool) {
    faker_db::health_check(&pool).await.unwrap();

    let catalog = PgPlanCatalog::new(pool);
    let basic = catalog.get_one_by_default_name().await.unwrap();
    assert_eq!(basic.name, BASIC_PLAN_NAME);
    assert!(basic.is_basic());

    let same = catalog.get_one(basic.id).await.unwrap();
    assert_eq!(same, basic);

    assert_matches!(
        catalog.get_one(basic.id + 1000).await,
        Err(CoreError::NotFound { entity: "Plan" })
    );
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find_user(pool: PgPool) {
    let plan_id = basic_plan_id(&pool).await;
    let users = PgUserDirectory::new(pool);

    let created = users.create(new_user("ada@example.com", plan_id)).await.unwrap();
    assert!(!created.is_confirmed);
    assert_eq!(created.role, Role::Basic);

    let by_email = users.get_by_email("ada@example.com").await.unwrap();
    assert_eq!(by_email.id, created.id);

    let by_credential = users
        .get_by_external_credential("cred-ada@example.com")
        .await
        .unwrap();
    assert_eq!(by_credential.id, created.id);

    assert_matches!(
        users.get_by_email("nobody@example.com").await,
        Err(CoreError::NotFound { entity: "User" })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_is_already_exists(pool: PgPool) {
    let plan_id = basic_plan_id(&pool).await;
    let users = PgUserDirectory::new(pool);

    users.create(new_user("dup@example.com", plan_id)).await.unwrap();

    let mut second = new_user("dup@example.com", plan_id);
    second.external_credential = "another-credential".to_string();
    assert_matches!(users.create(second).await, Err(CoreError::AlreadyExists(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_persists_mutable_fields(pool: PgPool) {
    let plan_id = basic_plan_id(&pool).await;
    let users = PgUserDirectory::new(pool);

    let mut user = users.create(new_user("grace@example.com", plan_id)).await.unwrap();
    user.is_confirmed = true;
    user.password_hash = "$argon2id$rotated".to_string();
    user.external_credential = "fresh-credential".to_string();

    let updated = users.update(&user).await.unwrap();
    assert!(updated.is_confirmed);
    assert_eq!(updated.password_hash, "$argon2id$rotated");

    assert_matches!(
        users.get_by_external_credential("cred-grace@example.com").await,
        Err(CoreError::NotFound { .. })
    );
    assert_eq!(
        users
            .get_by_external_credential("fresh-credential")
            .await
            .unwrap()
            .id,
        user.id
    );
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_session_lifecycle(pool: PgPool) {
    let plan_id = basic_plan_id(&pool).await;
    let users = PgUserDirectory::new(pool.clone());
    let user = users.create(new_user("s@example.com", plan_id)).await.unwrap();

    let session = new_session(user.id, "hash-1");
    users.set_session(user.id, &session).await.unwrap();

    let found = users
        .get_session_by_refresh_token(user.id, "hash-1")
        .await
        .unwrap();
    assert_eq!(found.id, session.id);

    // Replacing in place keeps a single row under the same id.
    let mut rotated = session.clone();
    rotated.refresh_token_hash = "hash-2".to_string();
    users.set_session(user.id, &rotated).await.unwrap();

    assert_matches!(
        users.get_session_by_refresh_token(user.id, "hash-1").await,
        Err(CoreError::NotFound { entity: "Session" })
    );
    assert_eq!(
        users
            .get_session_by_refresh_token(user.id, "hash-2")
            .await
            .unwrap()
            .id,
        session.id
    );
    assert_eq!(session_count(&pool, user.id).await, 1);

    users.remove_session(user.id, session.id).await.unwrap();
    users.remove_session(user.id, session.id).await.unwrap();
    assert_eq!(session_count(&pool, user.id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_claim_session_requires_current_refresh_hash(pool: PgPool) {
    let plan_id = basic_plan_id(&pool).await;
    let users = PgUserDirectory::new(pool.clone());
    let user = users.create(new_user("claim@example.com", plan_id)).await.unwrap();

    let session = new_session(user.id, "hash-1");
    users.set_session(user.id, &session).await.unwrap();
    let mut rotated = session.clone();
    rotated.refresh_token_hash = "hash-2".to_string();
    users.set_session(user.id, &rotated).await.unwrap();

    assert!(!users.claim_session(user.id, session.id, "hash-1").await.unwrap());
    assert_eq!(session_count(&pool, user.id).await, 1);

    assert!(users.claim_session(user.id, session.id, "hash-2").await.unwrap());
    assert!(!users.claim_session(user.id, session.id, "hash-2").await.unwrap());
    assert_eq!(session_count(&pool, user.id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_session_lookup_is_scoped_to_user(pool: PgPool) {
    let plan_id = basic_plan_id(&pool).await;
    let users = PgUserDirectory::new(pool);
    let alice = users.create(new_user("alice@example.com", plan_id)).await.unwrap();
    let bob = users.create(new_user("bob@example.com", plan_id)).await.unwrap();

    users
        .set_session(alice.id, &new_session(alice.id, "shared-hash"))
        .await
        .unwrap();

    assert_matches!(
        users.get_session_by_refresh_token(bob.id, "shared-hash").await,
        Err(CoreError::NotFound { .. })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_set_session_for_unknown_user_is_not_found(pool: PgPool) {
    let users = PgUserDirectory::new(pool);
    assert_matches!(
        users.set_session(9999, &new_session(9999, "h")).await,
        Err(CoreError::NotFound { entity: "User" })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_set_session_bumps_last_visit(pool: PgPool) {
    let plan_id = basic_plan_id(&pool).await;
    let users = PgUserDirectory::new(pool.clone());
    let user = users.create(new_user("visit@example.com", plan_id)).await.unwrap();

    sqlx::query("UPDATE users SET last_visit_at = NOW() - INTERVAL '1 day' WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let before = users.get_by_id(user.id).await.unwrap().last_visit_at;

    users.set_session(user.id, &new_session(user.id, "h")).await.unwrap();

    let after = users.get_by_id(user.id).await.unwrap().last_visit_at;
    assert!(after > before);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_logins_keep_every_session(pool: PgPool) {
    let plan_id = basic_plan_id(&pool).await;
    let users = PgUserDirectory::new(pool.clone());
    let user = users.create(new_user("busy@example.com", plan_id)).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let users = users.clone();
        let session = new_session(user.id, &format!("hash-{i}"));
        handles.push(tokio::spawn(async move {
            users.set_session(session.user_id, &session).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(session_count(&pool, user.id).await, 8);
}

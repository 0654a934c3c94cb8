#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use argon2::Params;
use faker_auth::password::PasswordHasher;
use faker_auth::{AuthConfig, AuthCoordinator, AuthDeps, JwtConfig, SignInInput, SignUpInput};
use faker_cache::{EphemeralStore, MemoryStore};
use faker_core::directory::UserDirectory;
use faker_core::token::{AuthContext, TokenPair};
use faker_core::user::{NewUser, Role, User};
use faker_test_support::{MemoryDirectory, RecordingNotifier, StaticPlanCatalog};

pub const SECRET: &str = "integration-test-secret-long-enough";
pub const PASSWORD: &str = "correct-horse-battery";
pub const CODE_TTL: Duration = Duration::from_secs(600);
pub const ACCESS_TTL: Duration = Duration::from_secs(900);

/// Cheap Argon2 parameters so tests do not spend seconds hashing.
pub fn fast_params() -> Params {
    Params::new(8, 1, 1, None).unwrap()
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        jwt: JwtConfig {
            secret: SECRET.to_string(),
            access_token_ttl: ACCESS_TTL,
            refresh_token_ttl: Duration::from_secs(30 * 24 * 3600),
        },
        verification_code_ttl: CODE_TTL,
        password_params: fast_params(),
    }
}

pub struct Harness {
    pub coordinator: AuthCoordinator,
    pub directory: Arc<MemoryDirectory>,
    pub notifier: Arc<RecordingNotifier>,
}

/// Coordinator over in-memory collaborators with unlimited Basic quotas.
pub fn harness() -> Harness {
    harness_with_limits(0, 0)
}

pub fn harness_with_limits(internal: i64, external: i64) -> Harness {
    harness_with_store(internal, external, Arc::new(MemoryStore::new()))
}

pub fn harness_with_store(
    internal: i64,
    external: i64,
    ephemeral: Arc<dyn EphemeralStore>,
) -> Harness {
    let directory = Arc::new(MemoryDirectory::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let plans = Arc::new(StaticPlanCatalog::with_basic_limits(internal, external));

    let coordinator = AuthCoordinator::new(
        AuthDeps {
            users: directory.clone(),
            sessions: directory.clone(),
            plans,
            notifier: notifier.clone(),
            ephemeral,
        },
        &test_config(),
    );

    Harness {
        coordinator,
        directory,
        notifier,
    }
}

pub fn sign_up_input(email: &str) -> SignUpInput {
    SignUpInput {
        first_name: "ada".to_string(),
        last_name: "lovelace".to_string(),
        email: email.to_string(),
        password: PASSWORD.to_string(),
        receive_notification: true,
    }
}

pub fn sign_in_input(email: &str, password: &str) -> SignInInput {
    SignInInput {
        email: email.to_string(),
        password: password.to_string(),
        client: "integration-test".to_string(),
        ip_address: "127.0.0.1".to_string(),
    }
}

/// The eight-digit code on its own line in the latest email to `email`.
pub fn last_code_sent_to(h: &Harness, email: &str) -> String {
    let mail = h
        .notifier
        .last_to(email)
        .unwrap_or_else(|| panic!("no email sent to {email}"));
    mail.body
        .lines()
        .map(str::trim)
        .find(|line| line.len() == 8 && line.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or_else(|| panic!("no code in email body: {}", mail.body))
        .to_string()
}

/// Sign up and confirm `email`, returning the confirmed user.
pub async fn confirmed_user(h: &Harness, email: &str) -> User {
    h.coordinator.sign_up(sign_up_input(email)).await.unwrap();
    let code = last_code_sent_to(h, email);
    h.coordinator.confirm_user_email(email, &code).await.unwrap();
    h.directory.get_by_email(email).await.unwrap()
}

/// Sign in a freshly confirmed user and resolve their access token.
pub async fn signed_in(h: &Harness, email: &str) -> (User, TokenPair, AuthContext) {
    let user = confirmed_user(h, email).await;
    let (tokens, _) = h
        .coordinator
        .sign_in(sign_in_input(email, PASSWORD))
        .await
        .unwrap();
    let ctx = h.coordinator.validate_token(&tokens.access_token).await.unwrap();
    (user, tokens, ctx)
}

/// Insert a confirmed user straight into the directory, bypassing the
/// ephemeral store.
pub async fn seed_confirmed_user(directory: &MemoryDirectory, email: &str) -> User {
    let hash = PasswordHasher::new(fast_params()).hash(PASSWORD).unwrap();
    let mut user = directory
        .create(NewUser {
            first_name: "grace".to_string(),
            last_name: "hopper".to_string(),
            email: email.to_string(),
            password_hash: hash,
            role: Role::Basic,
            receive_notification: false,
            plan_id: 1,
            external_credential: format!("cred-{email}"),
        })
        .await
        .unwrap();
    user.is_confirmed = true;
    directory.update(&user).await.unwrap()
}

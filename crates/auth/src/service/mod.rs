//! The identity coordinator.
//!
//! [`AuthCoordinator`] composes the durable directory, the ephemeral stores,
//! the token issuer and the notifier into the account, session and quota
//! flows. It holds no per-request state; callers pass identity explicitly as
//! an [`AuthContext`](faker_core::token::AuthContext).

mod account;
mod quota;
mod session;

use std::sync::Arc;
use std::time::Duration;

use faker_cache::{EphemeralStore, QuotaCounter, RevocationList, VerificationCodeStore};
use faker_core::directory::{SessionStore, UserDirectory};
use faker_core::notify::Notifier;
use faker_core::plan::PlanCatalog;

use crate::config::AuthConfig;
use crate::jwt::TokenIssuer;
use crate::password::PasswordHasher;

pub use account::SignUpInput;
pub use session::SignInInput;

/// External collaborators of the coordinator.
pub struct AuthDeps {
    pub users: Arc<dyn UserDirectory>,
    pub sessions: Arc<dyn SessionStore>,
    pub plans: Arc<dyn PlanCatalog>,
    pub notifier: Arc<dyn Notifier>,
    /// Backs the revocation list, quota counters and verification codes.
    pub ephemeral: Arc<dyn EphemeralStore>,
}

pub struct AuthCoordinator {
    users: Arc<dyn UserDirectory>,
    sessions: Arc<dyn SessionStore>,
    plans: Arc<dyn PlanCatalog>,
    notifier: Arc<dyn Notifier>,

    revocations: RevocationList,
    quotas: QuotaCounter,
    codes: VerificationCodeStore,

    tokens: TokenIssuer,
    hasher: PasswordHasher,

    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
    verification_code_ttl: Duration,
}

impl AuthCoordinator {
    pub fn new(deps: AuthDeps, config: &AuthConfig) -> Self {
        Self {
            users: deps.users,
            sessions: deps.sessions,
            plans: deps.plans,
            notifier: deps.notifier,
            revocations: RevocationList::new(deps.ephemeral.clone()),
            quotas: QuotaCounter::new(deps.ephemeral.clone()),
            codes: VerificationCodeStore::new(deps.ephemeral),
            tokens: TokenIssuer::new(&config.jwt.secret),
            hasher: PasswordHasher::new(config.password_params.clone()),
            access_token_ttl: config.jwt.access_token_ttl,
            refresh_token_ttl: config.jwt.refresh_token_ttl,
            verification_code_ttl: config.verification_code_ttl,
        }
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }
}

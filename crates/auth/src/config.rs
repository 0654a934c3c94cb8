use std::time::Duration;

use argon2::Params;

use crate::jwt::JwtConfig;

/// Default verification-code window in seconds (15 minutes).
const DEFAULT_VERIFICATION_CODE_TTL_SECS: u64 = 900;

/// Settings for [`AuthCoordinator`](crate::AuthCoordinator).
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    /// Lifetime of confirmation and password-reset codes.
    pub verification_code_ttl: Duration,
    /// Argon2id cost parameters for newly hashed passwords.
    pub password_params: Params,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads everything [`JwtConfig::from_env`] reads, plus:
    ///
    /// | Env Var                      | Required | Default |
    /// |------------------------------|----------|---------|
    /// | `VERIFICATION_CODE_TTL_SECS` | no       | `900`   |
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`JwtConfig::from_env`], or if
    /// `VERIFICATION_CODE_TTL_SECS` is not a number.
    pub fn from_env() -> Self {
        let code_ttl_secs: u64 = std::env::var("VERIFICATION_CODE_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_VERIFICATION_CODE_TTL_SECS.to_string())
            .parse()
            .expect("VERIFICATION_CODE_TTL_SECS must be a valid u64");

        Self {
            jwt: JwtConfig::from_env(),
            verification_code_ttl: Duration::from_secs(code_ttl_secs),
            password_params: Params::default(),
        }
    }
}

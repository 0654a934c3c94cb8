//! Access-token signing/parsing and refresh-token helpers.
//!
//! Access tokens are HS256-signed JWTs carrying a [`Claims`] payload. Refresh
//! tokens are opaque random strings; only their SHA-256 hash is stored
//! server-side so a database leak does not compromise active sessions.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use faker_core::error::CoreError;
use faker_core::token::Claims;
use faker_core::types::DbId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Bytes of entropy in a refresh token.
const REFRESH_TOKEN_BYTES: usize = 32;

/// Default access token lifetime in seconds (15 minutes).
const DEFAULT_ACCESS_TTL_SECS: u64 = 900;
/// Default refresh token lifetime in seconds (30 days).
const DEFAULT_REFRESH_TTL_SECS: u64 = 30 * 24 * 3600;

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    pub access_token_ttl: Duration,
    /// Lifetime of a session, and therefore of its refresh token.
    pub refresh_token_ttl: Duration,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                | Required | Default   |
    /// |------------------------|----------|-----------|
    /// | `JWT_SECRET`           | **yes**  | --        |
    /// | `JWT_ACCESS_TTL_SECS`  | no       | `900`     |
    /// | `JWT_REFRESH_TTL_SECS` | no       | `2592000` |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty, or a TTL is not a number.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_secs: u64 = std::env::var("JWT_ACCESS_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_TTL_SECS.to_string())
            .parse()
            .expect("JWT_ACCESS_TTL_SECS must be a valid u64");

        let refresh_secs: u64 = std::env::var("JWT_REFRESH_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_TTL_SECS.to_string())
            .parse()
            .expect("JWT_REFRESH_TTL_SECS must be a valid u64");

        Self {
            secret,
            access_token_ttl: Duration::from_secs(access_secs),
            refresh_token_ttl: Duration::from_secs(refresh_secs),
        }
    }
}

/// Stateless signer and parser for access tokens.
///
/// Holds one static symmetric key. Only HS256 is accepted on parse, with no
/// expiry leeway.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign an access token that expires `ttl` from now.
    pub fn generate_access_token(
        &self,
        user_id: DbId,
        plan_id: DbId,
        session_id: Uuid,
        token_id: Uuid,
        ttl: Duration,
    ) -> Result<String, CoreError> {
        let claims = Claims {
            user_id,
            session_id,
            token_id,
            plan_id,
            exp: chrono::Utc::now().timestamp() + ttl.as_secs() as i64,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| CoreError::Internal(format!("Failed to sign access token: {e}")))
    }

    /// Verify signature, algorithm and expiry, returning the embedded claims.
    pub fn parse(&self, token: &str) -> Result<Claims, CoreError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => CoreError::ExpiredToken,
                _ => CoreError::InvalidToken,
            })
    }
}

/// A fresh refresh token: 32 CSPRNG bytes, base64url without padding.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Compute the SHA-256 hex digest of a refresh token.
///
/// Use this to compare an incoming refresh token against the stored hash.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

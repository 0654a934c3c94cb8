//! Argon2id password hashing, verification, and strength validation.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself.

use std::sync::{Arc, OnceLock};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use faker_core::error::CoreError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Plaintext behind the hash that [`PasswordHasher::verify_dummy`] checks against.
const DUMMY_PASSWORD: &str = "no-account-has-this-password";

/// Salted slow hash for account passwords.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    /// Hash of [`DUMMY_PASSWORD`] under `params`, built on first use.
    dummy_hash: Arc<OnceLock<String>>,
}

impl Default for PasswordHasher {
    /// Argon2id with the crate's recommended parameters.
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl PasswordHasher {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password with a random salt.
    ///
    /// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
    pub fn hash(&self, password: &str) -> Result<String, CoreError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))
    }

    /// Verify a plaintext password against a stored PHC-formatted hash.
    ///
    /// Parameters are read from the hash itself, so hashes produced with other
    /// parameters still verify.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, CoreError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| CoreError::Internal(format!("Stored password hash is malformed: {e}")))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CoreError::Internal(format!("Password verification failed: {e}"))),
        }
    }

    /// Spend one verification's worth of work on `password` and report no
    /// match. Used when there is no stored hash to check, so a missing
    /// account costs the same as a wrong password.
    pub fn verify_dummy(&self, password: &str) -> Result<bool, CoreError> {
        let hash = match self.dummy_hash.get() {
            Some(hash) => hash,
            None => {
                let fresh = self.hash(DUMMY_PASSWORD)?;
                self.dummy_hash.get_or_init(|| fresh)
            }
        };
        self.verify(password, hash)?;
        Ok(false)
    }
}

/// Validate that a password meets minimum strength requirements.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

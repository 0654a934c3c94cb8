//! Key layout and constants for short-lived verification codes.

/// Stored in place of the reset code once it has been checked.
pub const VERIFIED_SENTINEL: &str = "verified";

/// Number of digits in confirmation and reset codes.
pub const CODE_LENGTH: usize = 8;

/// Bytes of entropy in a freshly minted external credential.
pub const EXTERNAL_CREDENTIAL_BYTES: usize = 16;

/// What a verification code proves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    EmailConfirmation,
    PasswordReset,
}

impl CodePurpose {
    fn prefix(&self) -> &'static str {
        match self {
            CodePurpose::EmailConfirmation => "confirm",
            CodePurpose::PasswordReset => "password-reset",
        }
    }

    /// Store key for this purpose, namespaced by `email`.
    pub fn key(&self, email: &str) -> String {
        format!("{}:{email}", self.prefix())
    }
}

//! Random verification codes and external credentials.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use faker_core::verification::{CODE_LENGTH, EXTERNAL_CREDENTIAL_BYTES};
use rand::Rng;

/// A numeric code of [`CODE_LENGTH`] digits. Leading zeros are kept.
pub fn generate_numeric_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// A fresh opaque external credential, base64url without padding.
pub fn generate_external_credential() -> String {
    let mut bytes = [0u8; EXTERNAL_CREDENTIAL_BYTES];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

//! Plain-text bodies for the identity emails.

use std::time::Duration;

fn minutes(ttl: Duration) -> u64 {
    ttl.as_secs() / 60
}

pub fn confirm_email_body(name: &str, code: &str, ttl: Duration) -> String {
    format!(
        "Hello, {name}!\n\n\
         Thanks for signing up. Use this code to confirm your email address:\n\n\
         {code}\n\n\
         The code is valid for {} minutes.\n",
        minutes(ttl)
    )
}

pub fn password_reset_body(name: &str, code: &str, ttl: Duration) -> String {
    format!(
        "Hello, {name}!\n\n\
         We received a request to reset your password. Your reset code is:\n\n\
         {code}\n\n\
         The code is valid for {} minutes. If you did not ask for a reset, ignore this email.\n",
        minutes(ttl)
    )
}

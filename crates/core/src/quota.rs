//! Request categories and the daily quota window.

use std::fmt;

use chrono::{Duration, NaiveTime};
use serde::Serialize;

use crate::types::Timestamp;

/// Which surface a quota-gated request came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestCategory {
    /// Signed-in users on the first-party API.
    Internal,
    /// Callers authenticated with an external credential.
    External,
}

impl RequestCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestCategory::Internal => "internal",
            RequestCategory::External => "external",
        }
    }
}

impl fmt::Display for RequestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Today's counters for both categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Usage {
    pub internal: i64,
    pub external: i64,
}

/// The next UTC midnight strictly after `now`.
pub fn next_utc_midnight(now: Timestamp) -> Timestamp {
    let tomorrow = now.date_naive() + Duration::days(1);
    tomorrow.and_time(NaiveTime::MIN).and_utc()
}

/// Time remaining from `now` until the next UTC midnight. Never zero.
pub fn duration_until_next_utc_midnight(now: Timestamp) -> std::time::Duration {
    (next_utc_midnight(now) - now)
        .to_std()
        .unwrap_or(std::time::Duration::from_secs(1))
}

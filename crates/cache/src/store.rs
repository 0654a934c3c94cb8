//! The ephemeral key-value store seam.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

/// Generic primitives with native per-key expiry.
///
/// Backs the revocation list, quota counters and verification codes.
/// Implementations must not block indefinitely; every call either answers or
/// fails within a bounded time.
#[async_trait]
pub trait EphemeralStore: Send + Sync {
    /// Value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite `key` with `value`, expiring after `ttl`. A zero `ttl`
    /// leaves the key absent.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Atomically add one to the integer under `key` (absent counts as 0) and
    /// return the new value. An existing TTL is kept.
    async fn incr(&self, key: &str) -> Result<i64, StoreError>;

    /// Set or refresh the TTL of an existing key. No-op on a missing key.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

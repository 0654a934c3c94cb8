//! Redis-backed [`EphemeralStore`].
//!
//! Uses a multiplexed [`ConnectionManager`] that reconnects on its own; every
//! command is bounded by [`RedisConfig::timeout`] so a stalled server surfaces
//! as [`StoreError::Timeout`] instead of hanging the request.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::error::StoreError;
use crate::store::EphemeralStore;

/// Default per-command deadline.
const DEFAULT_TIMEOUT_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Connection URL, e.g. `redis://127.0.0.1:6379/0`.
    pub url: String,
    /// Deadline applied to every command.
    pub timeout: Duration,
}

impl RedisConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `REDIS_URL`        | **yes**  | --      |
    /// | `REDIS_TIMEOUT_MS` | no       | `500`   |
    ///
    /// # Panics
    ///
    /// Panics if `REDIS_URL` is not set or `REDIS_TIMEOUT_MS` is not a number.
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL").expect("REDIS_URL must be set in the environment");

        let timeout_ms: u64 = std::env::var("REDIS_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse()
            .expect("REDIS_TIMEOUT_MS must be a valid u64");

        Self {
            url,
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    timeout: Duration,
}

impl RedisStore {
    /// Open a managed connection to the configured server.
    pub async fn connect(config: &RedisConfig) -> Result<Self, StoreError> {
        let client = redis::Client::open(config.url.as_str())?;
        let conn = match tokio::time::timeout(config.timeout, client.get_connection_manager()).await
        {
            Ok(conn) => conn?,
            Err(_) => return Err(StoreError::Timeout(config.timeout)),
        };

        tracing::info!(timeout_ms = config.timeout.as_millis() as u64, "Redis connection established");

        Ok(Self {
            conn,
            timeout: config.timeout,
        })
    }

    /// Round-trip a `PING`.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _pong: String = self
            .bounded(async { redis::cmd("PING").query_async(&mut conn).await })
            .await?;
        Ok(())
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

/// Millisecond TTL for `PSETEX`/`PEXPIRE`, never rounding a non-zero TTL to 0.
fn ttl_millis(ttl: Duration) -> u64 {
    (ttl.as_millis() as u64).max(1)
}

#[async_trait]
impl EphemeralStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        self.bounded(conn.get::<_, Option<String>>(key)).await
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        if ttl.is_zero() {
            return self.bounded(conn.del::<_, ()>(key)).await;
        }
        self.bounded(conn.pset_ex::<_, _, ()>(key, value, ttl_millis(ttl)))
            .await
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.conn.clone();
        self.bounded(conn.incr::<_, _, i64>(key, 1)).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        self.bounded(conn.pexpire::<_, ()>(key, ttl_millis(ttl) as i64))
            .await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        self.bounded(conn.del::<_, ()>(key)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_millisecond_ttl_is_not_rounded_to_zero() {
        assert_eq!(ttl_millis(Duration::from_micros(10)), 1);
        assert_eq!(ttl_millis(Duration::from_secs(60)), 60_000);
    }
}

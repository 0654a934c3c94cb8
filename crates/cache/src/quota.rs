//! Per-user daily request counters.

use std::sync::Arc;
use std::time::Duration;

use faker_core::error::CoreError;
use faker_core::quota::{duration_until_next_utc_midnight, RequestCategory, Usage};
use faker_core::types::{DbId, Timestamp};

use crate::store::EphemeralStore;

const KEY_PREFIX: &str = "api:req_count";

/// Counts quota-gated requests per user and category.
///
/// Every increment re-arms the counter to expire at the next UTC midnight,
/// so every counter resets once a day.
#[derive(Clone)]
pub struct QuotaCounter {
    store: Arc<dyn EphemeralStore>,
}

impl QuotaCounter {
    pub fn new(store: Arc<dyn EphemeralStore>) -> Self {
        Self { store }
    }

    fn key(user_id: DbId, category: RequestCategory) -> String {
        format!("{KEY_PREFIX}:{user_id}:{category}")
    }

    /// Today's count for one category. An absent counter is zero.
    pub async fn get_by_user_id(
        &self,
        user_id: DbId,
        category: RequestCategory,
    ) -> Result<i64, CoreError> {
        let key = Self::key(user_id, category);
        match self.store.get(&key).await? {
            None => Ok(0),
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                CoreError::Internal(format!("request counter '{key}' holds a non-integer"))
            }),
        }
    }

    /// Today's counts for both categories.
    pub async fn usage(&self, user_id: DbId) -> Result<Usage, CoreError> {
        Ok(Usage {
            internal: self.get_by_user_id(user_id, RequestCategory::Internal).await?,
            external: self.get_by_user_id(user_id, RequestCategory::External).await?,
        })
    }

    /// Add one to the counter and return the new value.
    pub async fn incr(&self, user_id: DbId, category: RequestCategory) -> Result<i64, CoreError> {
        Ok(self.store.incr(&Self::key(user_id, category)).await?)
    }

    pub async fn expire(
        &self,
        user_id: DbId,
        category: RequestCategory,
        ttl: Duration,
    ) -> Result<(), CoreError> {
        Ok(self.store.expire(&Self::key(user_id, category), ttl).await?)
    }

    /// Count one completed request at `now`.
    ///
    /// The expiry is set on every call, not just the first. The deadline is
    /// the same for the whole day, so re-arming never moves the reset, and a
    /// counter whose first expiry was lost still resets at midnight.
    pub async fn record(
        &self,
        user_id: DbId,
        category: RequestCategory,
        now: Timestamp,
    ) -> Result<i64, CoreError> {
        let count = self.incr(user_id, category).await?;
        let ttl = duration_until_next_utc_midnight(now);
        self.expire(user_id, category, ttl).await?;
        if count == 1 {
            tracing::debug!(
                user_id,
                %category,
                ttl_secs = ttl.as_secs(),
                "Armed daily request counter"
            );
        }
        Ok(count)
    }
}

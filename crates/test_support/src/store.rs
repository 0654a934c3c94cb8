use std::time::Duration;

use async_trait::async_trait;
use faker_cache::{EphemeralStore, StoreError};

/// An ephemeral store whose every call times out.
pub struct UnavailableStore;

const DEADLINE: Duration = Duration::from_millis(500);

#[async_trait]
impl EphemeralStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Timeout(DEADLINE))
    }

    async fn set_with_ttl(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), StoreError> {
        Err(StoreError::Timeout(DEADLINE))
    }

    async fn incr(&self, _key: &str) -> Result<i64, StoreError> {
        Err(StoreError::Timeout(DEADLINE))
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> Result<(), StoreError> {
        Err(StoreError::Timeout(DEADLINE))
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Timeout(DEADLINE))
    }
}

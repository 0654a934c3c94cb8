use std::sync::Arc;

use async_trait::async_trait;
use faker_auth::AuthCoordinator;
use faker_cache::RedisStore;
use faker_db::DbPool;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<AuthCoordinator>,
    /// Reachability of the backing stores, reported by `/health`.
    pub health: Arc<dyn HealthProbe>,
}

/// Liveness checks for the stores the coordinator depends on.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn database_healthy(&self) -> bool;
    async fn ephemeral_store_healthy(&self) -> bool;
}

/// Probes the production PostgreSQL pool and Redis connection.
pub struct BackendProbe {
    pub pool: DbPool,
    pub redis: RedisStore,
}

#[async_trait]
impl HealthProbe for BackendProbe {
    async fn database_healthy(&self) -> bool {
        faker_db::health_check(&self.pool).await.is_ok()
    }

    async fn ephemeral_store_healthy(&self) -> bool {
        self.redis.health_check().await.is_ok()
    }
}

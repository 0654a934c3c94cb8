//! Ephemeral state: token revocation, daily request quotas and verification
//! codes, all on top of a TTL-capable key-value store.

pub mod error;
pub mod memory;
pub mod quota;
pub mod redis_store;
pub mod revocation;
pub mod store;
pub mod verification;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use quota::QuotaCounter;
pub use redis_store::{RedisConfig, RedisStore};
pub use revocation::RevocationList;
pub use store::EphemeralStore;
pub use verification::VerificationCodeStore;

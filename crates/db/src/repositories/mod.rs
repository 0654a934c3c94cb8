//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and return raw `sqlx` results.

pub mod plan_repo;
pub mod session_repo;
pub mod user_repo;

pub use plan_repo::PlanRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

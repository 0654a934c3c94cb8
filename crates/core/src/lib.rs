//! Domain types, error taxonomy and collaborator traits for the identity and
//! access core.
//!
//! This crate has no storage or transport dependencies; the durable store
//! (`faker-db`), the ephemeral store (`faker-cache`) and the coordinator
//! (`faker-auth`) all build on it.

pub mod directory;
pub mod error;
pub mod notify;
pub mod plan;
pub mod quota;
pub mod session;
pub mod token;
pub mod types;
pub mod user;
pub mod verification;

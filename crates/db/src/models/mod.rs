//! Row structs for the identity tables.
//!
//! Each row converts into its `faker_core` domain counterpart; conversions
//! that can fail (e.g. an unknown role string) return `CoreError::Internal`.

pub mod plan;
pub mod session;
pub mod user;

//! Faker identity API server library.
//!
//! Exposes the HTTP building blocks (config, state, error mapping, extractors,
//! routes) so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the caller behind a Bearer access token.
//! - [`auth::ExternalUser`] -- the caller behind an `X-Api-Key` credential.
//! - [`client::ClientInfo`] -- user agent and IP recorded on new sessions.

pub mod auth;
pub mod client;

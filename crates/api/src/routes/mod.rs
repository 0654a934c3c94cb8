pub mod auth;
pub mod external;
pub mod health;
pub mod me;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/sign-up                       create account (public)
/// /auth/sign-in                       open session (public)
/// /auth/refresh                       rotate tokens (public)
/// /auth/sign-out                      end session (bearer)
/// /auth/confirm-email                 confirm account (public)
/// /auth/password-reset/request        email a reset code (public)
/// /auth/password-reset/verify         check the reset code (public)
/// /auth/password-reset                set a new password (public)
///
/// /me                                 profile, internal quota (bearer)
/// /me                       PATCH     rename (bearer)
/// /me/usage                           today's request counts (bearer)
/// /me/notification                    email preference (bearer)
/// /me/password                        change password (bearer)
/// /me/external-credential             regenerate API key (bearer)
///
/// /external/whoami                    credential owner, external quota (X-Api-Key)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/me", me::router())
        .nest("/external", external::router())
}

//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /sign-up                 -> sign_up
/// POST /sign-in                 -> sign_in
/// POST /refresh                 -> refresh
/// POST /sign-out                -> sign_out (requires auth)
/// POST /confirm-email           -> confirm_email
/// POST /password-reset/request  -> password_reset_request
/// POST /password-reset/verify   -> verify_password_reset
/// POST /password-reset          -> password_reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(auth::sign_up))
        .route("/sign-in", post(auth::sign_in))
        .route("/refresh", post(auth::refresh))
        .route("/sign-out", post(auth::sign_out))
        .route("/confirm-email", post(auth::confirm_email))
        .route("/password-reset/request", post(auth::password_reset_request))
        .route("/password-reset/verify", post(auth::verify_password_reset))
        .route("/password-reset", post(auth::password_reset))
}

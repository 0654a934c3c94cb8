use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`. All require a Bearer access token.
///
/// ```text
/// GET   /                     -> get_me
/// PATCH /                     -> update_profile
/// GET   /usage                -> usage
/// PUT   /notification         -> set_notification
/// PUT   /password             -> change_password
/// POST  /external-credential  -> regenerate_external_credential
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me::get_me).patch(me::update_profile))
        .route("/usage", get(me::usage))
        .route("/notification", put(me::set_notification))
        .route("/password", put(me::change_password))
        .route("/external-credential", post(me::regenerate_external_credential))
}

use axum::routing::get;
use axum::Router;

use crate::handlers::external;
use crate::state::AppState;

/// Routes mounted at `/external`, authenticated with `X-Api-Key`.
pub fn router() -> Router<AppState> {
    Router::new().route("/whoami", get(external::whoami))
}

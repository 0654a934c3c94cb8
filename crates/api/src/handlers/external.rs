//! Handlers reachable with an external credential.

use axum::extract::State;
use axum::Json;
use faker_core::quota::RequestCategory;
use faker_core::types::DbId;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::ExternalUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub user_id: DbId,
    pub plan_id: DbId,
    pub email: String,
}

/// GET /api/v1/external/whoami
///
/// Identify the credential's owner. Counts against the external daily quota.
pub async fn whoami(
    State(state): State<AppState>,
    caller: ExternalUser,
) -> AppResult<Json<DataResponse<WhoAmIResponse>>> {
    let user = state.coordinator.get_user(caller.user_id).await?;

    let data = state
        .coordinator
        .with_quota(user.id, user.plan_id, RequestCategory::External, move || async move {
            Ok(WhoAmIResponse {
                user_id: user.id,
                plan_id: user.plan_id,
                email: user.email,
            })
        })
        .await?;

    Ok(Json(DataResponse { data }))
}

//! Handlers for the signed-in caller's own account under `/me`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use faker_core::error::CoreError;
use faker_core::quota::{RequestCategory, Usage};
use faker_core::types::DbId;
use faker_core::user::{Role, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Public view of a user, with today's request counts.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub plan_id: DbId,
    pub role: Role,
    pub external_credential: String,
    pub receive_notification: bool,
    pub today_internal_requests: i64,
    pub today_external_requests: i64,
}

impl UserResponse {
    pub fn new(user: &User, usage: Usage) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            plan_id: user.plan_id,
            role: user.role,
            external_credential: user.external_credential.clone(),
            receive_notification: user.receive_notification,
            today_internal_requests: usage.internal,
            today_external_requests: usage.external,
        }
    }
}

/// Request body for `PUT /me/password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 8, max = 64))]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub new_password_confirm: String,
}

/// Request body for `PATCH /me`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 64))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub last_name: Option<String>,
}

/// Request body for `PUT /me/notification`.
#[derive(Debug, Deserialize)]
pub struct NotificationRequest {
    pub receive_notification: bool,
}

/// GET /api/v1/me
///
/// The caller's profile. Counts against the internal daily quota.
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let coordinator = &state.coordinator;
    let user_id = ctx.user_id;
    let data = coordinator
        .with_quota(user_id, ctx.plan_id, RequestCategory::Internal, move || async move {
            let user = coordinator.get_user(user_id).await?;
            let usage = coordinator.usage_today(user_id).await?;
            Ok::<_, CoreError>(UserResponse::new(&user, usage))
        })
        .await?;

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/me/usage
pub async fn usage(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> AppResult<Json<DataResponse<Usage>>> {
    let data = state.coordinator.usage_today(ctx.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// PATCH /api/v1/me
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;
    if input.first_name.is_none() && input.last_name.is_none() {
        return Err(AppError::BadRequest("Nothing to update".into()));
    }

    let user = state
        .coordinator
        .update_profile(ctx.user_id, input.first_name, input.last_name)
        .await?;
    let usage = state.coordinator.usage_today(user.id).await?;

    Ok(Json(DataResponse {
        data: UserResponse::new(&user, usage),
    }))
}

/// PUT /api/v1/me/notification
pub async fn set_notification(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(input): Json<NotificationRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = state
        .coordinator
        .set_receive_notification(ctx.user_id, input.receive_notification)
        .await?;
    let usage = state.coordinator.usage_today(user.id).await?;

    Ok(Json(DataResponse {
        data: UserResponse::new(&user, usage),
    }))
}

/// PUT /api/v1/me/password
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;
    if input.new_password == input.current_password {
        return Err(AppError::BadRequest(
            "New password must differ from the current one".into(),
        ));
    }

    state
        .coordinator
        .change_password(ctx.user_id, &input.current_password, &input.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/me/external-credential
///
/// Issue a new external credential; the previous one stops resolving.
pub async fn regenerate_external_credential(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = state
        .coordinator
        .regenerate_external_credential(ctx.user_id)
        .await?;
    let usage = state.coordinator.usage_today(user.id).await?;

    Ok(Json(DataResponse {
        data: UserResponse::new(&user, usage),
    }))
}

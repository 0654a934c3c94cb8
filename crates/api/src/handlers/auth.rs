//! Handlers for the `/auth` resource: account creation, sessions and
//! password recovery.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use faker_auth::{SignInInput, SignUpInput};
use faker_core::token::TokenPair;
use faker_core::types::DbId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::me::UserResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::client::ClientInfo;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/sign-up`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 64, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 64, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email is invalid"), length(max = 64))]
    pub email: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    #[serde(default)]
    pub receive_notification: bool,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Request body for `POST /auth/sign-in`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Email is invalid"), length(max = 64))]
    pub email: String,
    #[validate(length(min = 1, max = 64, message = "Password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    pub user_id: DbId,
    #[validate(length(min = 32, message = "Refresh token is malformed"))]
    pub refresh_token: String,
}

/// Token pair returned by sign-in and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

impl TokenResponse {
    fn new(pair: TokenPair, state: &AppState) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: state.coordinator.access_token_ttl().as_secs(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub tokens: TokenResponse,
    pub user: UserResponse,
}

/// Request body for `POST /auth/confirm-email` and `POST /auth/password-reset/verify`.
#[derive(Debug, Deserialize, Validate)]
pub struct CodeRequest {
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 8, message = "Code is malformed"))]
    pub code: String,
}

/// Request body for `POST /auth/password-reset/request`.
#[derive(Debug, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
}

/// Request body for `POST /auth/password-reset`.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirm: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/sign-up
///
/// Create an unconfirmed account and email a confirmation code. Returns 201.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(input): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<SignUpResponse>)> {
    input.validate()?;

    let user = state
        .coordinator
        .sign_up(SignUpInput {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: input.password,
            receive_notification: input.receive_notification,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }),
    ))
}

/// POST /api/v1/auth/sign-in
///
/// Authenticate with email + password and open a new session.
pub async fn sign_in(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(input): Json<SignInRequest>,
) -> AppResult<Json<SignInResponse>> {
    input.validate()?;

    let (pair, user) = state
        .coordinator
        .sign_in(SignInInput {
            email: input.email,
            password: input.password,
            client: client.user_agent,
            ip_address: client.ip_address,
        })
        .await?;

    let usage = state.coordinator.usage_today(user.id).await?;

    Ok(Json(SignInResponse {
        tokens: TokenResponse::new(pair, &state),
        user: UserResponse::new(&user, usage),
    }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair. The presented refresh token
/// stops working.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    input.validate()?;

    let pair = state
        .coordinator
        .refresh_token(input.user_id, &input.refresh_token)
        .await?;

    Ok(Json(TokenResponse::new(pair, &state)))
}

/// POST /api/v1/auth/sign-out
///
/// End the current session and revoke the presented access token. Returns 204.
pub async fn sign_out(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> AppResult<StatusCode> {
    state.coordinator.sign_out(&ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/confirm-email
pub async fn confirm_email(
    State(state): State<AppState>,
    Json(input): Json<CodeRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;
    state
        .coordinator
        .confirm_user_email(&input.email, &input.code)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/password-reset/request
pub async fn password_reset_request(
    State(state): State<AppState>,
    Json(input): Json<EmailRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;
    state
        .coordinator
        .password_reset_request(&input.email)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/password-reset/verify
pub async fn verify_password_reset(
    State(state): State<AppState>,
    Json(input): Json<CodeRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;
    state
        .coordinator
        .verify_password_reset(&input.email, &input.code)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/password-reset
///
/// Set a new password. Only accepted after a successful verify for the same
/// email while the verification is still live.
pub async fn password_reset(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;
    state
        .coordinator
        .password_reset(&input.email, &input.password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use faker_core::error::CoreError;
use faker_core::token::AuthContext;
use faker_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the external credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authenticated caller extracted from a Bearer access token.
///
/// The token is checked against the signing key, the user record and the
/// revocation list before the handler runs:
///
/// ```ignore
/// async fn my_handler(AuthUser(ctx): AuthUser) -> AppResult<StatusCode> {
///     tracing::info!(user_id = ctx.user_id, "handling request");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                tracing::debug!("Missing Authorization header");
                AppError::Core(CoreError::InvalidToken)
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            tracing::debug!("Authorization header is not a Bearer token");
            AppError::Core(CoreError::InvalidToken)
        })?;

        let ctx = state.coordinator.validate_token(token).await?;
        Ok(AuthUser(ctx))
    }
}

/// Caller authenticated with an external credential in `X-Api-Key`.
#[derive(Debug, Clone, Copy)]
pub struct ExternalUser {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for ExternalUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Core(CoreError::InvalidToken))?;

        let user_id = state.coordinator.validate_external_token(credential).await?;
        Ok(ExternalUser { user_id })
    }
}

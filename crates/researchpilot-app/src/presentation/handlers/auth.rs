use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::HandlerResult;
use crate::application::dtos::{
    ChangePasswordRequest, CurrentUserDto, LoginRequest, MessageResponse, RefreshRequest,
    RegisterRequest, TokenResponse,
};
use crate::presentation::auth::AuthUser;
use crate::presentation::error::AppError;
use crate::presentation::extract::ApiJson;
use crate::presentation::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let tokens = state.services.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> HandlerResult<TokenResponse> {
    Ok(Json(state.services.auth.login(request).await?))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> HandlerResult<TokenResponse> {
    Ok(Json(state.services.auth.refresh(request).await?))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<CurrentUserDto> {
    Ok(Json(state.services.auth.me(&user).await?))
}

/// POST /auth/logout
///
/// Tokens are stateless; the client discards them.
pub async fn logout(AuthUser(user): AuthUser) -> HandlerResult<MessageResponse> {
    tracing::info!(user_id = %user.id(), "User logged out");
    Ok(Json(MessageResponse::new("Successfully logged out")))
}

/// PUT /auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> HandlerResult<MessageResponse> {
    state.services.auth.change_password(user, request).await?;
    Ok(Json(MessageResponse::new("Password changed successfully")))
}

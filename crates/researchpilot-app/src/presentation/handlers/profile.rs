use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use researchpilot_domain::research_interest::ResearchInterest;
use researchpilot_domain::shared::InterestId;

use super::HandlerResult;
use crate::application::dtos::{
    CreateInterestRequest, ProfileDto, SubscriptionDto, UpdateInterestRequest,
    UpdateProfileRequest,
};
use crate::presentation::auth::AuthUser;
use crate::presentation::error::AppError;
use crate::presentation::extract::{ApiJson, ApiPath};
use crate::presentation::state::AppState;

/// GET /profile
pub async fn get_profile(AuthUser(user): AuthUser) -> HandlerResult<ProfileDto> {
    Ok(Json(ProfileDto::from(&user)))
}

/// PUT /profile
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> HandlerResult<ProfileDto> {
    Ok(Json(
        state.services.profile.update_profile(user, request).await?,
    ))
}

/// GET /profile/interests
pub async fn list_interests(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<Vec<ResearchInterest>> {
    Ok(Json(state.services.profile.list_interests(&user).await?))
}

/// POST /profile/interests
pub async fn create_interest(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateInterestRequest>,
) -> Result<(StatusCode, Json<ResearchInterest>), AppError> {
    let interest = state.services.profile.create_interest(&user, request).await?;
    Ok((StatusCode::CREATED, Json(interest)))
}

/// GET /profile/interests/{id}
pub async fn get_interest(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> HandlerResult<ResearchInterest> {
    Ok(Json(
        state
            .services
            .profile
            .get_interest(&user, InterestId::new(id))
            .await?,
    ))
}

/// PUT /profile/interests/{id}
pub async fn update_interest(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateInterestRequest>,
) -> HandlerResult<ResearchInterest> {
    Ok(Json(
        state
            .services
            .profile
            .update_interest(&user, InterestId::new(id), request)
            .await?,
    ))
}

/// DELETE /profile/interests/{id}
pub async fn delete_interest(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    state
        .services
        .profile
        .delete_interest(&user, InterestId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /profile/subscription
pub async fn get_subscription(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<Option<SubscriptionDto>> {
    Ok(Json(state.services.profile.subscription(&user).await?))
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::info;
use researchpilot_domain::check_in::{CheckIn, CheckInSummary, MonthCalendar};
use researchpilot_domain::shared::CheckInId;

use super::HandlerResult;
use crate::application::dtos::{CheckInListQuery, CheckInStreakDto, CreateCheckInRequest};
use crate::presentation::auth::AuthUser;
use crate::presentation::error::AppError;
use crate::presentation::extract::{ApiJson, ApiPath, ApiQuery};
use crate::presentation::state::AppState;

/// GET /checkins
pub async fn list_check_ins(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<CheckInListQuery>,
) -> HandlerResult<Vec<CheckIn>> {
    Ok(Json(state.services.check_ins.list(user.id(), query).await?))
}

/// POST /checkins
pub async fn create_check_in(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateCheckInRequest>,
) -> Result<(StatusCode, Json<CheckIn>), AppError> {
    let check_in = state.services.check_ins.create(user.id(), request).await?;
    Ok((StatusCode::CREATED, Json(check_in)))
}

/// GET /checkins/today
pub async fn today_check_in(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<Option<CheckIn>> {
    Ok(Json(state.services.check_ins.today(user.id()).await?))
}

/// GET /checkins/stats
pub async fn check_in_stats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<CheckInSummary> {
    Ok(Json(state.services.check_ins.summary(user.id()).await?))
}

/// GET /checkins/streak
pub async fn get_check_in_streak(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<CheckInStreakDto> {
    info!("[streak] get_check_in_streak user_id={}", user.id());
    Ok(Json(
        state
            .queries
            .check_in_streak
            .get_streak_stats(user.id())
            .await?,
    ))
}

/// GET /checkins/calendar/{year}/{month}
pub async fn get_check_in_calendar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath((year, month)): ApiPath<(i32, u32)>,
) -> HandlerResult<MonthCalendar> {
    info!(
        "[streak] get_check_in_calendar user_id={} year={} month={}",
        user.id(),
        year,
        month
    );
    Ok(Json(
        state
            .queries
            .check_in_streak
            .get_calendar(user.id(), year, month)
            .await?,
    ))
}

/// DELETE /checkins/{id}
pub async fn delete_check_in(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    state
        .services
        .check_ins
        .delete(user.id(), CheckInId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

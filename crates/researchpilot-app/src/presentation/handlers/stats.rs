use axum::extract::State;
use axum::Json;
use researchpilot_domain::achievement::Achievement;
use researchpilot_domain::check_in::ActivityHeatmap;

use super::HandlerResult;
use crate::application::dtos::{
    HeatmapQuery, LearningProgressDto, OverviewStatsDto, TimeSeriesDto, TimeSeriesQuery,
};
use crate::presentation::auth::AuthUser;
use crate::presentation::extract::ApiQuery;
use crate::presentation::state::AppState;

/// GET /stats/overview
pub async fn overview(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<OverviewStatsDto> {
    Ok(Json(state.queries.stats.overview(&user).await?))
}

/// GET /stats/timeseries
pub async fn timeseries(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<TimeSeriesQuery>,
) -> HandlerResult<TimeSeriesDto> {
    Ok(Json(state.queries.stats.timeseries(&user, query).await?))
}

/// GET /stats/achievements
pub async fn achievements(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<Vec<Achievement>> {
    Ok(Json(state.queries.stats.achievements(&user).await?))
}

/// GET /stats/learning-progress
pub async fn learning_progress(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<LearningProgressDto> {
    Ok(Json(state.queries.stats.learning_progress(&user).await?))
}

/// GET /stats/activity-heatmap?year=
pub async fn activity_heatmap(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<HeatmapQuery>,
) -> HandlerResult<ActivityHeatmap> {
    Ok(Json(state.queries.stats.heatmap(&user, query.year).await?))
}

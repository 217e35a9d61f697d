use axum::extract::State;
use axum::Json;
use researchpilot_domain::roadmap::Roadmap;

use super::HandlerResult;
use crate::application::dtos::{GenerateRoadmapRequest, StatusResponse};
use crate::presentation::auth::AuthUser;
use crate::presentation::extract::ApiJson;
use crate::presentation::state::AppState;

/// GET /roadmap/current
pub async fn current_roadmap(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<Option<Roadmap>> {
    Ok(Json(state.services.roadmaps.current(user.id()).await?))
}

/// POST /roadmap/generate
pub async fn generate_roadmap(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<GenerateRoadmapRequest>,
) -> HandlerResult<Roadmap> {
    Ok(Json(
        state.services.roadmaps.generate(user.id(), request).await?,
    ))
}

/// DELETE /roadmap/current
pub async fn delete_roadmap(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<StatusResponse> {
    let status = if state.services.roadmaps.delete(user.id()).await? {
        "ok"
    } else {
        "not_found"
    };
    Ok(Json(StatusResponse { status }))
}

use axum::extract::State;
use axum::Json;
use researchpilot_domain::topic::ScoredTopic;

use super::HandlerResult;
use crate::application::dtos::RecommendTopicsRequest;
use crate::presentation::auth::AuthUser;
use crate::presentation::extract::ApiJson;
use crate::presentation::state::AppState;

/// POST /topics/recommend
pub async fn recommend_topics(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<RecommendTopicsRequest>,
) -> HandlerResult<Vec<ScoredTopic>> {
    Ok(Json(
        state.services.topics.recommend(user.id(), request).await?,
    ))
}

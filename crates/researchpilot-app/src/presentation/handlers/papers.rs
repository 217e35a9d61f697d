use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use researchpilot_domain::paper::{PaperSearchResult, SavedPaper};
use researchpilot_domain::shared::SavedPaperId;

use super::HandlerResult;
use crate::application::dtos::{
    PaperListQuery, PaperSearchRequest, SavePaperRequest, UpdatePaperRequest,
};
use crate::presentation::auth::AuthUser;
use crate::presentation::error::AppError;
use crate::presentation::extract::{ApiJson, ApiPath, ApiQuery};
use crate::presentation::state::AppState;

/// GET /papers
pub async fn list_papers(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<PaperListQuery>,
) -> HandlerResult<Vec<SavedPaper>> {
    Ok(Json(state.services.papers.list(user.id(), query).await?))
}

/// POST /papers
pub async fn save_paper(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<SavePaperRequest>,
) -> Result<(StatusCode, Json<SavedPaper>), AppError> {
    let paper = state.services.papers.save(user.id(), request).await?;
    Ok((StatusCode::CREATED, Json(paper)))
}

/// POST /papers/search
pub async fn search_papers(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<PaperSearchRequest>,
) -> HandlerResult<Vec<PaperSearchResult>> {
    Ok(Json(state.services.papers.search(user.id(), request).await?))
}

/// GET /papers/{id}
pub async fn get_paper(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> HandlerResult<SavedPaper> {
    Ok(Json(
        state
            .services
            .papers
            .get(user.id(), SavedPaperId::new(id))
            .await?,
    ))
}

/// PATCH /papers/{id}
pub async fn update_paper(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdatePaperRequest>,
) -> HandlerResult<SavedPaper> {
    Ok(Json(
        state
            .services
            .papers
            .update(user.id(), SavedPaperId::new(id), request)
            .await?,
    ))
}

/// DELETE /papers/{id}
pub async fn delete_paper(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    state
        .services
        .papers
        .delete(user.id(), SavedPaperId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

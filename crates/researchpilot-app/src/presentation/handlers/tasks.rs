use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use researchpilot_domain::shared::TaskId;

use super::HandlerResult;
use crate::application::dtos::{
    CreateTaskRequest, TaskDto, TaskListQuery, TaskStatsDto, UpdateTaskRequest,
};
use crate::presentation::auth::AuthUser;
use crate::presentation::error::AppError;
use crate::presentation::extract::{ApiJson, ApiPath, ApiQuery};
use crate::presentation::state::AppState;

/// GET /tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<TaskListQuery>,
) -> HandlerResult<Vec<TaskDto>> {
    Ok(Json(state.services.tasks.list(user.id(), query).await?))
}

/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskDto>), AppError> {
    let task = state.services.tasks.create(user.id(), request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks/stats
pub async fn task_stats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> HandlerResult<TaskStatsDto> {
    Ok(Json(state.services.tasks.stats(user.id()).await?))
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> HandlerResult<TaskDto> {
    Ok(Json(
        state.services.tasks.get(user.id(), TaskId::new(id)).await?,
    ))
}

/// PUT /tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateTaskRequest>,
) -> HandlerResult<TaskDto> {
    Ok(Json(
        state
            .services
            .tasks
            .update(user.id(), TaskId::new(id), request)
            .await?,
    ))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    state.services.tasks.delete(user.id(), TaskId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /tasks/{id}/complete
pub async fn complete_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> HandlerResult<TaskDto> {
    Ok(Json(
        state
            .services
            .tasks
            .complete(user.id(), TaskId::new(id))
            .await?,
    ))
}

/// PATCH /tasks/{id}/uncomplete
pub async fn uncomplete_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> HandlerResult<TaskDto> {
    Ok(Json(
        state
            .services
            .tasks
            .uncomplete(user.id(), TaskId::new(id))
            .await?,
    ))
}

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::application::queries::{CsvKind, ExportFile};
use crate::presentation::auth::AuthUser;
use crate::presentation::error::AppError;
use crate::presentation::extract::ApiPath;
use crate::presentation::state::AppState;

fn attachment(file: ExportFile, content_type: &'static str) -> Response {
    let disposition = format!("attachment; filename={}", file.filename);
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    )
        .into_response()
}

/// GET /export/json
pub async fn export_json(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Response, AppError> {
    let file = state.queries.export.export_json(&user).await?;
    Ok(attachment(file, "application/json"))
}

/// GET /export/csv/{kind}
pub async fn export_csv(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(kind): ApiPath<CsvKind>,
) -> Result<Response, AppError> {
    let file = state.queries.export.export_csv(&user, kind).await?;
    Ok(attachment(file, "text/csv; charset=utf-8"))
}

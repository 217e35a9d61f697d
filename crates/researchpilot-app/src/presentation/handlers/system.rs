use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// GET /
pub async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "ResearchPilot API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if state.runtime.db.ping().await {
        "connected"
    } else {
        "disconnected"
    };

    Json(HealthResponse {
        status: "healthy",
        database,
    })
}

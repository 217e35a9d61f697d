//! HTTP handlers. Each one unpacks the request and delegates to the
//! application layer.

use axum::Json;

use super::error::AppError;

pub mod auth;
pub mod check_ins;
pub mod export;
pub mod papers;
pub mod profile;
pub mod roadmap;
pub mod stats;
pub mod system;
pub mod tasks;
pub mod topics;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

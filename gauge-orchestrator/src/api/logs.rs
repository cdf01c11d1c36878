//! Log API Handlers

use axum::{Json, extract::State};
use gauge_core::dto::MessageResponse;
use gauge_core::dto::logs::LogsResponse;

use super::AppState;
use crate::api::error::ApiResult;
use crate::service::log_service;

/// GET /api/logs
/// Tail of the worker log
pub async fn get_logs(State(state): State<AppState>) -> ApiResult<Json<LogsResponse>> {
    let logs = log_service::tail(&state.settings.log_path(), log_service::DEFAULT_TAIL_LINES).await?;

    Ok(Json(LogsResponse {
        success: true,
        logs,
    }))
}

/// POST /api/logs/clear
/// Truncate the worker log
pub async fn clear_logs(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    log_service::clear(&state.settings.log_path()).await?;

    Ok(Json(MessageResponse::ok()))
}

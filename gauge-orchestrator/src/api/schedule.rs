//! Schedule API Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use gauge_core::dto::MessageResponse;
use gauge_core::dto::schedule::{ScheduleResponse, SetScheduleRequest};
use serde_json::Value;

use super::{AppState, json_object};
use crate::api::error::ApiResult;
use crate::service::schedule_service;

/// GET /api/cron
/// Current schedule table of the worker environment
pub async fn get_schedule(State(state): State<AppState>) -> ApiResult<Json<ScheduleResponse>> {
    let entry = schedule_service::get_schedule(state.channel.as_ref()).await?;

    Ok(Json(ScheduleResponse::from(entry)))
}

/// POST /api/cron
/// Replace the schedule table with a single worker entry
pub async fn set_schedule(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let req = SetScheduleRequest::from(json_object(body)?);
    let expr = schedule_service::parse_expression(req.expression())?;

    schedule_service::set_schedule(
        state.channel.as_ref(),
        &state.settings.worker_profile(),
        &expr,
        &req.config,
        &state.settings.schedule_log_path,
    )
    .await?;

    Ok(Json(MessageResponse::with_message(format!(
        "Schedule updated: {}",
        expr
    ))))
}

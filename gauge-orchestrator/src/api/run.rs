//! Run API Handlers
//!
//! On-demand launches and run status.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use gauge_core::domain::config::RunConfiguration;
use gauge_core::dto::MessageResponse;
use gauge_core::dto::status::StatusResponse;
use serde_json::Value;

use super::{AppState, json_object};
use crate::api::error::ApiResult;
use crate::service::{launch_service, status_service};

/// POST /api/run
/// Launch the worker with the given configuration and return immediately
pub async fn run_now(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let config = RunConfiguration::from(json_object(body)?);
    tracing::info!("Launching worker run (mode: {})", config.effective_mode());

    launch_service::run_now(
        state.channel.as_ref(),
        &state.settings.worker_profile(),
        &config,
        &state.settings.log_path(),
    )
    .await?;

    Ok(Json(MessageResponse::with_message(
        "Run started, follow the log for progress",
    )))
}

/// GET /api/status
/// Whether a worker process is currently alive; never fails
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let run_state =
        status_service::status(state.channel.as_ref(), &state.settings.worker_process).await;

    Json(StatusResponse::from(run_state))
}

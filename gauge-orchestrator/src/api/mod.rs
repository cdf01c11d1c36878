//! API Module
//!
//! HTTP API layer for the orchestrator, a thin adapter from routes to
//! service operations. Each submodule handles endpoints for one concern.

pub mod config;
pub mod error;
pub mod health;
pub mod logs;
pub mod results;
pub mod run;
pub mod schedule;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, rejection::JsonRejection},
    routing::{get, post},
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::channel::ExecChannel;
use crate::config::Settings;
use error::{ApiError, ApiResult};

/// Upper bound for request bodies, uploads included
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shared handler state
///
/// Holds only immutable settings and the channel; run configuration is read
/// per request and handed to services as an argument.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub channel: Arc<dyn ExecChannel>,
}

impl AppState {
    pub fn new(settings: Settings, channel: Arc<dyn ExecChannel>) -> Self {
        Self {
            settings: Arc::new(settings),
            channel,
        }
    }
}

/// Accept a JSON body only if it is an object
///
/// Configuration bodies merge leniently over defaults, so anything else
/// would silently read as an all-defaults configuration.
pub(crate) fn json_object(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    let Json(document) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if !document.is_object() {
        return Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }

    Ok(document)
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Results
        .route("/api/results", get(results::get_results))
        // Configuration
        .route("/api/config", get(config::get_config).post(config::save_config))
        .route("/api/upload", post(config::upload_file))
        // Runs
        .route("/api/run", post(run::run_now))
        .route("/api/status", get(run::get_status))
        // Logs
        .route("/api/logs", get(logs::get_logs))
        .route("/api/logs/clear", post(logs::clear_logs))
        // Schedule
        .route("/api/cron", get(schedule::get_schedule).post(schedule::set_schedule))
        // Add state and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

//! Results API Handler

use axum::{Json, extract::State};
use gauge_core::dto::results::ResultsResponse;

use super::AppState;
use crate::api::error::ApiResult;
use crate::service::{ServiceError, result_service};

/// GET /api/results
/// Latest measurement results; an empty list until the worker has written any
pub async fn get_results(State(state): State<AppState>) -> ApiResult<Json<ResultsResponse>> {
    match result_service::read_results(&state.settings.results_path()).await {
        Ok(set) => Ok(Json(ResultsResponse {
            success: true,
            count: set.rows.len(),
            last_update: Some(set.last_update_display()),
            data: set.rows,
            message: None,
        })),
        Err(ServiceError::NotFound(msg)) => Ok(Json(ResultsResponse {
            success: true,
            data: Vec::new(),
            last_update: None,
            count: 0,
            message: Some(msg),
        })),
        Err(e) => Err(e.into()),
    }
}

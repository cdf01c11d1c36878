//! Configuration API Handlers
//!
//! Run configuration document and proxy source uploads.

use axum::{
    Json,
    extract::{Multipart, State, rejection::JsonRejection},
};
use gauge_core::domain::config::RunConfiguration;
use gauge_core::dto::MessageResponse;
use gauge_core::dto::config::ConfigResponse;
use gauge_core::dto::upload::UploadResponse;
use serde_json::Value;

use super::{AppState, json_object};
use crate::api::error::{ApiError, ApiResult};
use crate::service::{config_service, upload_service};

/// GET /api/config
/// Persisted configuration merged over defaults
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let config = config_service::load(&state.settings.config_path()).await;

    Json(ConfigResponse {
        success: true,
        config,
    })
}

/// POST /api/config
/// Replace the persisted configuration
pub async fn save_config(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let config = RunConfiguration::from(json_object(body)?);

    config_service::save(&state.settings.config_path(), &config).await?;

    Ok(Json(MessageResponse::with_message("Configuration saved")))
}

/// POST /api/upload
/// Store a proxy source file (multipart field `file`)
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(ApiError::BadRequest("No file selected".to_string()));
        }

        // Reject by name before reading the body.
        upload_service::validate_filename(&filename)?;

        let contents = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let stored = upload_service::store(&state.settings.upload_dir(), &filename, &contents).await?;

        return Ok(Json(UploadResponse {
            success: true,
            message: format!("File uploaded: {}", stored),
            filename: stored,
        }));
    }

    Err(ApiError::BadRequest("Missing file field".to_string()))
}

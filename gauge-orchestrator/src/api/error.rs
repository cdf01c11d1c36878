//! API Error Handling
//!
//! Unified error type and conversion for API responses. Every failure is
//! reported as `{ "success": false, "message": ... }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gauge_core::dto::MessageResponse;

use crate::service::ServiceError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    ChannelUnavailable(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ChannelUnavailable(msg) => {
                tracing::error!("Execution channel error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(MessageResponse::failure(message))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::ValidationRejected(msg) => ApiError::BadRequest(msg),
            ServiceError::ChannelUnavailable(msg) => ApiError::ChannelUnavailable(msg),
            ServiceError::MalformedArtifact(msg) => ApiError::InternalError(msg),
            ServiceError::Io(err) => ApiError::InternalError(err.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

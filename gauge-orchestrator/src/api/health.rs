//! Health Check API Handler

use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
/// Liveness of the control plane itself, not of the worker
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

//! Measurement result DTOs

use serde::{Deserialize, Serialize};

use crate::domain::result::ResultRow;

/// Response for `GET /api/results`
///
/// `last_update` is absent when the worker has not produced results yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub success: bool,
    pub data: Vec<ResultRow>,
    pub last_update: Option<String>,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

//! Worker log DTOs

use serde::{Deserialize, Serialize};

/// Response for `GET /api/logs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    pub success: bool,
    pub logs: String,
}

//! Configuration DTOs

use serde::{Deserialize, Serialize};

use crate::domain::config::RunConfiguration;

/// Response for `GET /api/config`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub success: bool,
    pub config: RunConfiguration,
}

//! Run status DTOs

use serde::{Deserialize, Serialize};

use crate::domain::run::RunState;

/// Response for `GET /api/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub status: RunState,
    pub running: bool,
}

impl From<RunState> for StatusResponse {
    fn from(state: RunState) -> Self {
        Self {
            success: true,
            status: state,
            running: state.is_running(),
        }
    }
}

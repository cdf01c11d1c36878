//! Data Transfer Objects for the control-plane API
//!
//! Every response carries a `success` flag. Failures share the
//! [`MessageResponse`] shape so callers can always read `message`.

pub mod config;
pub mod logs;
pub mod results;
pub mod schedule;
pub mod status;
pub mod upload;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement, or a failure with a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MessageResponse {
    /// Success without a message
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

//! Upload DTOs

use serde::{Deserialize, Serialize};

/// Response for `POST /api/upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    /// Stored filename, usable as the proxy `csv_file`
    pub filename: String,
}

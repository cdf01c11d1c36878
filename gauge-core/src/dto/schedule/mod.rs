//! Schedule DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::config::RunConfiguration;
use crate::domain::schedule::ScheduleEntry;

/// Response for `GET /api/cron`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub cron: String,
    pub has_cron: bool,
}

impl From<ScheduleEntry> for ScheduleResponse {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            success: true,
            cron: entry.raw,
            has_cron: entry.has_entry,
        }
    }
}

/// Request for `POST /api/cron`
///
/// The run configuration is sent flattened next to `schedule`. A missing
/// `schedule` falls back to the configuration's `cron_schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct SetScheduleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(flatten)]
    pub config: RunConfiguration,
}

impl SetScheduleRequest {
    /// Cron expression to install
    pub fn expression(&self) -> &str {
        self.schedule
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.config.cron_schedule)
    }
}

impl From<Value> for SetScheduleRequest {
    fn from(document: Value) -> Self {
        let schedule = document
            .get("schedule")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            schedule,
            config: RunConfiguration::from(document),
        }
    }
}

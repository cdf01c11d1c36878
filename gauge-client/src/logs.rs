//! Worker log endpoints

use crate::ControlClient;
use crate::error::Result;
use gauge_core::dto::MessageResponse;
use gauge_core::dto::logs::LogsResponse;

impl ControlClient {
    /// Tail of the worker log
    pub async fn logs(&self) -> Result<String> {
        let response = self.client.get(self.url("/api/logs")).send().await?;
        let body: LogsResponse = self.handle_response(response).await?;

        Ok(body.logs)
    }

    /// Truncate the worker log
    pub async fn clear_logs(&self) -> Result<MessageResponse> {
        let response = self.client.post(self.url("/api/logs/clear")).send().await?;

        self.handle_response(response).await
    }
}

//! Schedule endpoints

use crate::ControlClient;
use crate::error::Result;
use gauge_core::domain::config::RunConfiguration;
use gauge_core::dto::MessageResponse;
use gauge_core::dto::schedule::{ScheduleResponse, SetScheduleRequest};

impl ControlClient {
    /// Current schedule table of the worker environment
    pub async fn get_schedule(&self) -> Result<ScheduleResponse> {
        let response = self.client.get(self.url("/api/cron")).send().await?;

        self.handle_response(response).await
    }

    /// Install a single recurring run of `config`
    ///
    /// With `schedule` unset the configuration's own `cron_schedule` is used.
    /// Any existing table is replaced.
    pub async fn set_schedule(
        &self,
        schedule: Option<String>,
        config: RunConfiguration,
    ) -> Result<MessageResponse> {
        let req = SetScheduleRequest { schedule, config };
        let response = self
            .client
            .post(self.url("/api/cron"))
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

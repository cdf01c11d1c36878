//! Run-related API endpoints

use crate::ControlClient;
use crate::error::Result;
use gauge_core::domain::config::RunConfiguration;
use gauge_core::dto::MessageResponse;
use gauge_core::dto::status::StatusResponse;

impl ControlClient {
    /// Launch a worker run with `config`
    ///
    /// Returns as soon as the worker has been submitted. Progress shows up in
    /// the log and completion in [`ControlClient::status`].
    ///
    /// # Example
    /// ```no_run
    /// # use gauge_client::ControlClient;
    /// # use gauge_core::domain::config::RunConfiguration;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ControlClient::new("http://localhost:5000");
    /// client.run_now(&RunConfiguration::default()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_now(&self, config: &RunConfiguration) -> Result<MessageResponse> {
        let response = self
            .client
            .post(self.url("/api/run"))
            .json(config)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Whether a worker process is currently alive
    pub async fn status(&self) -> Result<StatusResponse> {
        let response = self.client.get(self.url("/api/status")).send().await?;

        self.handle_response(response).await
    }
}

//! Results endpoint

use crate::ControlClient;
use crate::error::Result;
use gauge_core::dto::results::ResultsResponse;

impl ControlClient {
    /// Latest measurement results
    ///
    /// Before the first run completes this is an empty list with no
    /// `last_update`, not an error.
    pub async fn results(&self) -> Result<ResultsResponse> {
        let response = self.client.get(self.url("/api/results")).send().await?;

        self.handle_response(response).await
    }
}

//! Configuration and upload endpoints

use std::path::Path;

use crate::ControlClient;
use crate::error::{ClientError, Result};
use gauge_core::domain::config::RunConfiguration;
use gauge_core::dto::MessageResponse;
use gauge_core::dto::config::ConfigResponse;
use gauge_core::dto::upload::UploadResponse;
use reqwest::multipart::{Form, Part};

impl ControlClient {
    /// Get the persisted run configuration
    pub async fn get_config(&self) -> Result<RunConfiguration> {
        let response = self.client.get(self.url("/api/config")).send().await?;
        let body: ConfigResponse = self.handle_response(response).await?;

        Ok(body.config)
    }

    /// Replace the persisted run configuration
    pub async fn save_config(&self, config: &RunConfiguration) -> Result<MessageResponse> {
        let response = self
            .client
            .post(self.url("/api/config"))
            .json(config)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Upload a proxy source file read from `path`
    ///
    /// The returned `filename` is the name the control plane stored it under.
    pub async fn upload_file(&self, path: &Path) -> Result<UploadResponse> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!("Not a file path: {}", path.display()))
            })?
            .to_string();

        let contents = tokio::fs::read(path).await.map_err(|e| {
            ClientError::InvalidRequest(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.upload_bytes(filename, contents).await
    }

    /// Upload in-memory contents as a proxy source file named `filename`
    pub async fn upload_bytes(
        &self,
        filename: impl Into<String>,
        contents: Vec<u8>,
    ) -> Result<UploadResponse> {
        let filename = filename.into();
        tracing::debug!("Uploading {} ({} bytes)", filename, contents.len());

        let form = Form::new().part("file", Part::bytes(contents).file_name(filename));
        let response = self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

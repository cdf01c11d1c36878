//! Gauge HTTP Client
//!
//! A small, typed client for the gauge control-plane API, shared by the CLI
//! and anything else that drives the worker remotely.
//!
//! # Example
//!
//! ```no_run
//! use gauge_client::ControlClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ControlClient::new("http://localhost:5000");
//!
//!     let status = client.status().await?;
//!     println!("Worker is {}", status.status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod config;
mod logs;
mod results;
mod runs;
mod schedule;

pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the gauge control-plane API
///
/// Endpoints are grouped by concern:
/// - Runs and run status
/// - Run configuration and proxy source uploads
/// - Worker log
/// - Results
/// - Recurring schedule
#[derive(Debug, Clone)]
pub struct ControlClient {
    /// Base URL of the control plane (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ControlClient {
    /// Create a new control-plane client
    ///
    /// # Example
    /// ```
    /// use gauge_client::ControlClient;
    ///
    /// let client = ControlClient::new("http://localhost:5000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the control plane
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the control plane is up
    pub async fn health(&self) -> Result<()> {
        let response = self.client.get(self.url("/health")).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_body(status.as_u16(), &body));
        }

        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::from_body(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

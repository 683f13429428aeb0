//! Conveyor Batch Service Client
//!
//! A typed HTTP client for the remote batch service's job-run API.
//!
//! The client covers exactly the surface the pipeline consumes: starting a
//! run (fire-and-forget), listing a job's runs most-recent-first, and
//! looking a single run up by id. Construct it once per pipeline execution
//! and share the handle across steps.
//!
//! # Example
//!
//! ```no_run
//! use conveyor_client::BatchClient;
//!
//! #[tokio::main]
//! async fn main() -> conveyor_client::Result<()> {
//!     let client = BatchClient::new("http://localhost:8080");
//!
//!     client.start_job_run("nightly-transfer").await?;
//!     let runs = client.list_job_runs("nightly-transfer").await?;
//!     println!("{} run(s) on record", runs.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod runs;

pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the batch service's run API
#[derive(Debug, Clone)]
pub struct BatchClient {
    /// Base URL of the batch service (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl BatchClient {
    /// Create a new batch service client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the batch service API
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new client with a custom HTTP client
    ///
    /// Use this to configure timeouts, proxies, or TLS settings.
    ///
    /// # Example
    /// ```
    /// use conveyor_client::BatchClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = BatchClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the batch service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle an API response and deserialize the JSON body
    ///
    /// Checks the status code first so error bodies are surfaced as
    /// [`ClientError::ApiError`] rather than decode failures.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is not used (submission)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

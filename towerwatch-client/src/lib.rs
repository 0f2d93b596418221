//! Towerwatch HTTP Client
//!
//! A small, type-safe client for the read-only endpoints of the tower
//! controller that the dashboard polls.
//!
//! # Example
//!
//! ```no_run
//! use towerwatch_client::TowerClient;
//!
//! #[tokio::main]
//! async fn main() -> towerwatch_client::Result<()> {
//!     let client = TowerClient::new("http://localhost:8080");
//!
//!     let jobs = client.list_jobs().await?;
//!     println!("{} job(s)", jobs.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod runners;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the tower controller
#[derive(Debug, Clone)]
pub struct TowerClient {
    /// Base URL of the controller (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl TowerClient {
    /// Create a new client with reqwest defaults
    ///
    /// # Example
    /// ```
    /// use towerwatch_client::TowerClient;
    ///
    /// let client = TowerClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
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

    /// Get the base URL of the controller
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check the status code and decode the body against `T`
    ///
    /// The body is read in full before decoding so that a shape mismatch is
    /// reported as [`ClientError::Decode`] rather than as a transport error.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes from /{}", body.len(), resource);

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode { resource, source })
    }
}

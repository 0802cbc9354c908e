//! Manus HTTP Client
//!
//! A small async client for the Manus task gateway, plus a helper that
//! submits a task and polls it until it reaches a terminal state.
//!
//! # Example
//!
//! ```no_run
//! use manus_client::{GatewayConfig, ManusClient, TaskPoller, WaitOptions};
//! use manus_core::dto::task::TaskSubmission;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ManusClient::new(GatewayConfig::new("sk-..."))?;
//!
//!     let poller = TaskPoller::new(client);
//!     let result = poller
//!         .run_and_wait(TaskSubmission::new("Summarise today's news"), WaitOptions::default())
//!         .await?;
//!
//!     println!("{}", result.to_json());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod files;
pub mod gateway;
pub mod poller;
mod tasks;

// Re-export commonly used types
pub use config::{API_KEY_HEADER, DEFAULT_BASE_URL, GatewayConfig};
pub use error::{ClientError, Result};
pub use gateway::TaskGateway;
pub use poller::{TaskPoller, WaitOptions};

use reqwest::{Client, Url};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::warn;

/// HTTP client for the Manus task gateway
///
/// Every request carries the configured API key. Responses are decoded as
/// JSON whatever their status code, so gateway-reported errors reach the
/// caller as data.
#[derive(Debug, Clone)]
pub struct ManusClient {
    /// Base URL of the gateway, without trailing slash
    base_url: String,
    /// HTTP client instance with the credential header preset
    client: Client,
}

impl ManusClient {
    /// Create a new gateway client
    ///
    /// # Arguments
    /// * `config` - Gateway location, credential and timeouts
    ///
    /// # Example
    /// ```
    /// use manus_client::{GatewayConfig, ManusClient};
    ///
    /// let client = ManusClient::new(GatewayConfig::new("sk-test")).unwrap();
    /// assert_eq!(client.base_url(), "https://api.manus.im");
    /// ```
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ClientError::Config(format!("API key is not a valid header value: {}", e)))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let client = Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        };
        client.endpoint(&[])?;

        Ok(client)
    }

    /// Get the base URL of the gateway
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL under the base URL
    ///
    /// Each segment is percent-encoded on its own, so a `/` or `?` inside a
    /// caller-supplied id cannot change the request path or query.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("Base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Decode a gateway response body as JSON
    ///
    /// A JSON body is returned whatever the status code. A non-JSON body is an
    /// `ApiError` on failure statuses and a `ParseError` otherwise.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => {
                if !status.is_success() {
                    warn!(status = status.as_u16(), "Gateway returned a failure status");
                }
                Ok(value)
            }
            Err(e) if status.is_success() => Err(ClientError::ParseError(format!(
                "Failed to parse JSON response: {}",
                e
            ))),
            Err(_) => Err(ClientError::api_error(status.as_u16(), body)),
        }
    }
}

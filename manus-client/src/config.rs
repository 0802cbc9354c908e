//! Client configuration
//!
//! Holds the gateway location, the static credential and HTTP timeouts for
//! one client instance.

use std::time::Duration;

/// Public Manus gateway
pub const DEFAULT_BASE_URL: &str = "https://api.manus.im";

/// Header carrying the pre-shared API key on every request.
/// Header names are case-insensitive; the gateway documents it as `API_KEY`.
pub const API_KEY_HEADER: &str = "api_key";

/// Gateway client configuration
#[derive(Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway (e.g., "https://api.manus.im")
    pub base_url: String,

    /// Pre-shared API key
    pub api_key: String,

    /// Total time allowed for a single HTTP request
    pub timeout: Duration,

    /// Time allowed to establish a connection
    pub connect_timeout: Duration,
}

impl GatewayConfig {
    /// Creates a configuration for the public gateway with default timeouts
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// First characters of the key, for log lines
    pub fn masked_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(10).collect();
        format!("{}...", prefix)
    }

    /// Validates the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(crate::ClientError::Config(
                "API key cannot be empty".to_string(),
            ));
        }

        if self.base_url.trim().is_empty() {
            return Err(crate::ClientError::Config(
                "base URL cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.masked_key())
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

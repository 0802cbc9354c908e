//! Configuration module
//!
//! Handles CLI configuration: the API credential and the gateway URL.

use manus_client::GatewayConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared API key sent with every request
    pub api_key: String,

    /// URL of the task gateway
    pub base_url: String,
}

impl Config {
    /// Build the configuration, rejecting a missing or blank credential
    pub fn new(api_key: Option<String>, base_url: String) -> Option<Self> {
        let api_key = api_key.filter(|key| !key.trim().is_empty())?;
        Some(Self { api_key, base_url })
    }

    /// Gateway client configuration for this CLI invocation
    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig::new(self.api_key.clone()).with_base_url(self.base_url.clone())
    }
}

//! Common test utilities for manus-client tests

use manus_client::{GatewayConfig, ManusClient};
use wiremock::MockServer;

/// API key every test client sends
pub const TEST_API_KEY: &str = "sk-test-0123456789";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> ManusClient {
    let config = GatewayConfig::new(TEST_API_KEY).with_base_url(server.uri());
    ManusClient::new(config).expect("client should build")
}

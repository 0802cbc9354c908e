//! File command handlers

use std::path::Path;

use anyhow::{Context, Result};
use manus_client::ManusClient;

use super::print_json;

/// Upload a file and print the gateway response
pub async fn upload_file(client: &ManusClient, path: &Path) -> Result<()> {
    let response = client
        .upload_file(path)
        .await
        .with_context(|| format!("Failed to upload {}", path.display()))?;

    print_json(&response)
}

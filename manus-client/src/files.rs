//! File upload endpoint

use std::path::Path;

use crate::ManusClient;
use crate::error::Result;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::debug;

/// Name of the multipart field carrying the file
const FILE_FIELD: &str = "file";

impl ManusClient {
    /// Upload a file to the gateway
    ///
    /// The file is read fully before any request is sent, so an unreadable
    /// path fails without network activity.
    ///
    /// # Arguments
    /// * `path` - Local file to upload
    ///
    /// # Returns
    /// The raw response describing the stored file
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| FILE_FIELD.to_string());

        debug!(file = %file_name, size = bytes.len(), "Uploading file");

        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new().part(FILE_FIELD, part);

        let url = self.endpoint(&["v1", "files"])?;
        let response = self.client.post(url).multipart(form).send().await?;

        self.handle_response(response).await
    }
}

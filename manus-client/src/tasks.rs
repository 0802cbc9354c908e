//! Task-related API endpoints

use crate::ManusClient;
use crate::error::{ClientError, Result};
use manus_core::domain::task::TaskStatus;
use manus_core::dto::task::{TaskListQuery, TaskSubmission};
use serde_json::Value;
use tracing::debug;

impl ManusClient {
    // =============================================================================
    // Task Lifecycle
    // =============================================================================

    /// Create a new task
    ///
    /// # Arguments
    /// * `submission` - Prompt and optional connector ids
    ///
    /// # Returns
    /// The raw create response. It carries a task identifier on success or an
    /// `"error"` field when the gateway refuses the task.
    ///
    /// # Example
    /// ```no_run
    /// # use manus_client::{GatewayConfig, ManusClient};
    /// # use manus_core::dto::task::TaskSubmission;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ManusClient::new(GatewayConfig::new("sk-..."))?;
    /// let response = client
    ///     .create_task(&TaskSubmission::new("Plan a trip to Kyoto").with_connectors(["gmail"]))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_task(&self, submission: &TaskSubmission) -> Result<Value> {
        if !submission.has_prompt() {
            return Err(ClientError::InvalidRequest(
                "prompt cannot be empty".to_string(),
            ));
        }

        let url = self.endpoint(&["v1", "tasks"])?;
        debug!(connectors = submission.connectors.len(), "Creating task");
        let response = self.client.post(url).json(submission).send().await?;

        self.handle_response(response).await
    }

    /// Get the status of a task
    ///
    /// # Arguments
    /// * `task_id` - The task identifier
    ///
    /// The id is sent as a single, percent-encoded path segment.
    ///
    /// # Returns
    /// The status document; it must be a JSON object
    pub async fn get_task(&self, task_id: &str) -> Result<TaskStatus> {
        if task_id.is_empty() {
            return Err(ClientError::InvalidRequest(
                "task id cannot be empty".to_string(),
            ));
        }
        // Dot segments are dropped by URL path normalisation
        if task_id == "." || task_id == ".." {
            return Err(ClientError::InvalidRequest(format!(
                "invalid task id: {}",
                task_id
            )));
        }

        let url = self.endpoint(&["v1", "tasks", task_id])?;
        let response = self.client.get(url).send().await?;

        let body = self.handle_response(response).await?;
        TaskStatus::from_value(body).ok_or_else(|| {
            ClientError::ParseError(format!("Status for task {} is not a JSON object", task_id))
        })
    }

    // =============================================================================
    // Task Query
    // =============================================================================

    /// List recent tasks
    ///
    /// # Arguments
    /// * `query` - How many tasks to return
    ///
    /// # Returns
    /// The raw list response
    pub async fn list_tasks(&self, query: TaskListQuery) -> Result<Value> {
        let url = self.endpoint(&["v1", "tasks"])?;
        let response = self.client.get(url).query(&query).send().await?;

        self.handle_response(response).await
    }
}

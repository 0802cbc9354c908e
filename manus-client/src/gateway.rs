//! Gateway seam used by the poller
//!
//! The poller only needs to create a task and fetch its status. Keeping that
//! behind a trait lets tests drive it with scripted responses.

use async_trait::async_trait;
use manus_core::domain::task::TaskStatus;
use manus_core::dto::task::TaskSubmission;
use serde_json::Value;

use crate::ManusClient;
use crate::error::Result;

/// Operations the poll-until-terminal loop performs against the gateway
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Submit a task, returning the raw create response
    async fn create_task(&self, submission: &TaskSubmission) -> Result<Value>;

    /// Fetch the current status of a task
    async fn get_task(&self, task_id: &str) -> Result<TaskStatus>;
}

#[async_trait]
impl TaskGateway for ManusClient {
    async fn create_task(&self, submission: &TaskSubmission) -> Result<Value> {
        ManusClient::create_task(self, submission).await
    }

    async fn get_task(&self, task_id: &str) -> Result<TaskStatus> {
        ManusClient::get_task(self, task_id).await
    }
}

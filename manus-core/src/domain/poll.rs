//! Polling session outcome

use serde_json::{Value, json};

use crate::domain::task::{TaskHandle, TaskStatus};

/// Final outcome of one submit-and-wait session
///
/// Every variant is ordinary data. Transport failures are reported
/// separately by the client as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PollResult {
    /// First terminal status observed, unchanged
    Finished(TaskStatus),
    /// The gateway refused the task; the create response is kept verbatim
    Rejected(Value),
    /// The create response carried no task identifier
    MissingTaskId { response: Value },
    /// The deadline elapsed before a terminal state was observed.
    /// The task may still be running remotely.
    TimedOut { task: TaskHandle },
    /// The caller cancelled the wait
    Cancelled { task: TaskHandle },
}

impl PollResult {
    pub fn is_finished(&self) -> bool {
        matches!(self, PollResult::Finished(_))
    }

    /// Handle of the polled task, if one was created
    pub fn task(&self) -> Option<&TaskHandle> {
        match self {
            PollResult::TimedOut { task } | PollResult::Cancelled { task } => Some(task),
            _ => None,
        }
    }

    /// Render the outcome in the gateway's JSON shape
    pub fn to_json(&self) -> Value {
        match self {
            PollResult::Finished(status) => status.clone().into_value(),
            PollResult::Rejected(response) => response.clone(),
            PollResult::MissingTaskId { response } => json!({
                "error": "No task_id in response",
                "response": response,
            }),
            PollResult::TimedOut { task } => json!({
                "error": "timeout",
                "task_id": task.task_id,
            }),
            PollResult::Cancelled { task } => json!({
                "error": "cancelled",
                "task_id": task.task_id,
            }),
        }
    }
}

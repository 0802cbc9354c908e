//! Task domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fields::{STATE_FIELDS, TASK_ID_FIELDS, resolve_id, resolve_in_object};

/// Sentinel state used when a status carries no recognisable state field
pub const UNKNOWN_STATE: &str = "unknown";

/// Handle to a task created on the gateway
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle {
    pub task_id: String,
}

impl TaskHandle {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
        }
    }

    /// Extract the handle from a create response.
    ///
    /// Numeric identifiers are rendered in decimal; empty or null ones are
    /// treated as missing.
    pub fn from_response(response: &Value) -> Option<Self> {
        resolve_id(response, TASK_ID_FIELDS).map(Self::new)
    }
}

impl std::fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.task_id)
    }
}

/// Status document returned by the gateway for a single task
///
/// Only the state is interpreted; every other field is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStatus(Map<String, Value>);

impl TaskStatus {
    /// Wrap a JSON value, returning `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// State from the first state field present.
    ///
    /// A present field that is not a string (e.g. `null`) is never terminal
    /// and does not fall back to the next candidate.
    pub fn state(&self) -> TaskState {
        match resolve_in_object(&self.0, STATE_FIELDS) {
            Some(Value::String(raw)) => TaskState::parse(raw),
            Some(other) => TaskState::Other(other.to_string()),
            None => TaskState::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state().is_terminal()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<TaskStatus> for Value {
    fn from(status: TaskStatus) -> Self {
        status.into_value()
    }
}

/// State of a remote task as resolved from its status document
///
/// Matching is exact and case-sensitive: `"Completed"` is not `Completed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Completed,
    Failed,
    Done,
    Unknown,
    Other(String),
}

impl TaskState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "completed" => TaskState::Completed,
            "failed" => TaskState::Failed,
            "done" => TaskState::Done,
            UNKNOWN_STATE => TaskState::Unknown,
            other => TaskState::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
            TaskState::Done => "done",
            TaskState::Unknown => UNKNOWN_STATE,
            TaskState::Other(raw) => raw,
        }
    }

    /// Whether polling stops on this state.
    ///
    /// `Failed` is terminal but not an error; the caller decides what a
    /// failed task means.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Done
        )
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Task DTOs

use serde::{Deserialize, Serialize};

/// Default number of tasks returned by a list request
pub const DEFAULT_LIST_LIMIT: u32 = 10;

/// Request to create a new task
///
/// `connectors` is omitted from the body when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSubmission {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connectors: Vec<String>,
}

impl TaskSubmission {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            connectors: Vec::new(),
        }
    }

    pub fn with_connectors<I, S>(mut self, connectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.connectors = connectors.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the prompt carries any non-whitespace text
    pub fn has_prompt(&self) -> bool {
        !self.prompt.trim().is_empty()
    }
}

/// Query parameters for listing recent tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListQuery {
    pub limit: u32,
}

impl Default for TaskListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_without_connectors() {
        let body = serde_json::to_value(TaskSubmission::new("summarise the report")).unwrap();
        assert_eq!(body, json!({ "prompt": "summarise the report" }));
    }

    #[test]
    fn test_body_with_connectors() {
        let submission = TaskSubmission::new("book a flight").with_connectors(["gmail", "calendar"]);
        let body = serde_json::to_value(submission).unwrap();
        assert_eq!(
            body,
            json!({ "prompt": "book a flight", "connectors": ["gmail", "calendar"] })
        );
    }

    #[test]
    fn test_empty_connector_list_is_omitted() {
        let submission = TaskSubmission::new("hi").with_connectors(Vec::<String>::new());
        let body = serde_json::to_value(submission).unwrap();
        assert!(body.get("connectors").is_none());
    }

    #[test]
    fn test_has_prompt() {
        assert!(TaskSubmission::new("x").has_prompt());
        assert!(!TaskSubmission::new("").has_prompt());
        assert!(!TaskSubmission::new("   \n").has_prompt());
    }

    #[test]
    fn test_list_query_default() {
        assert_eq!(TaskListQuery::default().limit, 10);
        let query = serde_json::to_value(TaskListQuery { limit: 3 }).unwrap();
        assert_eq!(query, json!({ "limit": 3 }));
    }
}

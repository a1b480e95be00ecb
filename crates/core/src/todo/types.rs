use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A task owned by a single user.
///
/// Identified by the `(user_id, todo_id)` pair. `user_id` selects the
/// partition, `todo_id` identifies the record inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub user_id: String,
    pub todo_id: String,
    pub name: String,
    pub due_date: NaiveDate,
    pub done: bool,
    /// Assigned by the store on creation, never modified afterwards.
    pub created_at: DateTime<Utc>,
    /// Public retrieval URL, only set through the attachment flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TodoItem {
    /// Creates a fresh, not yet completed task stamped with the current time.
    pub fn new(
        user_id: impl Into<String>,
        todo_id: impl Into<String>,
        name: impl Into<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            todo_id: todo_id.into(),
            name: name.into(),
            due_date,
            done: false,
            created_at: Utc::now(),
            attachment_url: None,
        }
    }

    /// Overrides the creation timestamp (useful for testing).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the attachment URL.
    pub fn with_attachment_url(mut self, url: impl Into<String>) -> Self {
        self.attachment_url = Some(url.into());
        self
    }

    /// Returns the composite key as `user_id/todo_id`, used in error messages.
    pub fn key(&self) -> String {
        record_key(&self.user_id, &self.todo_id)
    }
}

/// Formats a `(user_id, todo_id)` pair for display.
pub fn record_key(user_id: &str, todo_id: &str) -> String {
    format!("{user_id}/{todo_id}")
}

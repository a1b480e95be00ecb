//! Request payloads for task operations.
//!
//! Pure data types shared between the service and its callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::TodoItem;

/// Payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    pub due_date: NaiveDate,
}

impl CreateTodoRequest {
    pub fn new(name: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            due_date,
        }
    }

    /// Builds the record to store, with `done = false` and `created_at = now`.
    pub fn into_todo(self, user_id: impl Into<String>, todo_id: impl Into<String>) -> TodoItem {
        TodoItem::new(user_id, todo_id, self.name, self.due_date)
    }
}

/// Payload for updating a task.
///
/// All three mutable attributes are always supplied; there is no partial
/// update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub name: String,
    pub due_date: NaiveDate,
    pub done: bool,
}

impl UpdateTodoRequest {
    pub fn new(name: impl Into<String>, due_date: NaiveDate, done: bool) -> Self {
        Self {
            name: name.into(),
            due_date,
            done,
        }
    }

    /// Overwrites the mutable attributes of `todo`.
    pub fn apply_to(&self, todo: &mut TodoItem) {
        todo.name = self.name.clone();
        todo.due_date = self.due_date;
        todo.done = self.done;
    }
}

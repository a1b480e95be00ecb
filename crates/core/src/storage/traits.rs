use async_trait::async_trait;

use crate::todo::{CreateTodoRequest, TodoItem, UpdateTodoRequest};

use super::Result;

/// Record store for tasks.
///
/// Every operation addresses a single partition (`user_id`) and at most a
/// single record inside it. Implementations must surface every failure as a
/// [`RepositoryError`](super::RepositoryError); an empty result always means
/// "no data", never "something went wrong".
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Gets a single task. Absence is `Ok(None)`.
    async fn get_record(&self, user_id: &str, todo_id: &str) -> Result<Option<TodoItem>>;

    /// Lists every task of a user, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>>;

    /// Creates a task with `done = false` and `created_at = now`.
    ///
    /// Fails with `AlreadyExists` if the key is taken; the stored record is
    /// left untouched.
    async fn create_record(
        &self,
        user_id: &str,
        todo_id: &str,
        fields: CreateTodoRequest,
    ) -> Result<TodoItem>;

    /// Overwrites `name`, `due_date` and `done` on an existing task.
    async fn update_record(
        &self,
        user_id: &str,
        todo_id: &str,
        fields: &UpdateTodoRequest,
    ) -> Result<TodoItem>;

    /// Deletes an existing task. Fails with `NotFound` if absent.
    async fn delete_record(&self, user_id: &str, todo_id: &str) -> Result<()>;

    /// Lists the tasks of a user whose name contains `needle`.
    ///
    /// An empty needle returns every task. Order is unspecified.
    async fn search_by_name(&self, user_id: &str, needle: &str) -> Result<Vec<TodoItem>>;

    /// Sets `attachment_url` without touching any other attribute.
    async fn set_attachment_url(
        &self,
        user_id: &str,
        todo_id: &str,
        url: &str,
    ) -> Result<TodoItem>;
}

//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use todos_core::storage::{RepositoryError, Result, TodoRepository};
use todos_core::todo::{
    filter_by_name, record_key, CreateTodoRequest, TodoItem, UpdateTodoRequest,
};

const ENTITY_TYPE: &str = "Todo";

/// In-memory storage backend.
///
/// Each partition is a `Vec` in creation order, so listing newest-first is a
/// reverse walk and does not depend on clock resolution.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    partitions: Arc<RwLock<HashMap<String, Vec<TodoItem>>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored tasks across all users.
    pub async fn len(&self) -> usize {
        self.partitions.read().await.values().map(Vec::len).sum()
    }

    /// Returns true if no task is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn not_found(user_id: &str, todo_id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: ENTITY_TYPE,
        id: record_key(user_id, todo_id),
    }
}

fn find_mut<'a>(
    partitions: &'a mut HashMap<String, Vec<TodoItem>>,
    user_id: &str,
    todo_id: &str,
) -> Result<&'a mut TodoItem> {
    partitions
        .get_mut(user_id)
        .and_then(|todos| todos.iter_mut().find(|t| t.todo_id == todo_id))
        .ok_or_else(|| not_found(user_id, todo_id))
}

#[async_trait]
impl TodoRepository for InMemoryRepository {
    async fn get_record(&self, user_id: &str, todo_id: &str) -> Result<Option<TodoItem>> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(user_id)
            .and_then(|todos| todos.iter().find(|t| t.todo_id == todo_id))
            .cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(user_id)
            .map(|todos| todos.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn create_record(
        &self,
        user_id: &str,
        todo_id: &str,
        fields: CreateTodoRequest,
    ) -> Result<TodoItem> {
        let mut partitions = self.partitions.write().await;
        let todos = partitions.entry(user_id.to_string()).or_default();
        if todos.iter().any(|t| t.todo_id == todo_id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: ENTITY_TYPE,
                id: record_key(user_id, todo_id),
            });
        }

        let todo = fields.into_todo(user_id, todo_id);
        todos.push(todo.clone());
        Ok(todo)
    }

    async fn update_record(
        &self,
        user_id: &str,
        todo_id: &str,
        fields: &UpdateTodoRequest,
    ) -> Result<TodoItem> {
        let mut partitions = self.partitions.write().await;
        let todo = find_mut(&mut partitions, user_id, todo_id)?;
        fields.apply_to(todo);
        Ok(todo.clone())
    }

    async fn delete_record(&self, user_id: &str, todo_id: &str) -> Result<()> {
        let mut partitions = self.partitions.write().await;
        let todos = partitions
            .get_mut(user_id)
            .ok_or_else(|| not_found(user_id, todo_id))?;
        let position = todos
            .iter()
            .position(|t| t.todo_id == todo_id)
            .ok_or_else(|| not_found(user_id, todo_id))?;

        todos.remove(position);
        if todos.is_empty() {
            partitions.remove(user_id);
        }
        Ok(())
    }

    async fn search_by_name(&self, user_id: &str, needle: &str) -> Result<Vec<TodoItem>> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(user_id)
            .map(|todos| filter_by_name(todos, needle).into_iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn set_attachment_url(
        &self,
        user_id: &str,
        todo_id: &str,
        url: &str,
    ) -> Result<TodoItem> {
        let mut partitions = self.partitions.write().await;
        let todo = find_mut(&mut partitions, user_id, todo_id)?;
        todo.attachment_url = Some(url.to_string());
        Ok(todo.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn milk() -> CreateTodoRequest {
        CreateTodoRequest::new("Buy milk", date(1))
    }

    fn ids(todos: &[TodoItem]) -> Vec<&str> {
        todos.iter().map(|t| t.todo_id.as_str()).collect()
    }

    // ==================== Create Tests ====================

    #[tokio::test]
    async fn test_create_sets_defaults() {
        let repo = InMemoryRepository::new();

        let todo = repo.create_record("u1", "t1", milk()).await.unwrap();

        assert_eq!(todo.user_id, "u1");
        assert_eq!(todo.todo_id, "t1");
        assert_eq!(todo.name, "Buy milk");
        assert_eq!(todo.due_date, date(1));
        assert!(!todo.done);
        assert!(todo.attachment_url.is_none());

        let stored = repo.get_record("u1", "t1").await.unwrap();
        assert_eq!(stored, Some(todo));
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts_and_keeps_original() {
        let repo = InMemoryRepository::new();
        let original = repo.create_record("u1", "t1", milk()).await.unwrap();

        let result = repo
            .create_record("u1", "t1", CreateTodoRequest::new("Other", date(5)))
            .await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));

        let stored = repo.get_record("u1", "t1").await.unwrap();
        assert_eq!(stored, Some(original));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_same_todo_id_in_different_partitions() {
        let repo = InMemoryRepository::new();
        repo.create_record("u1", "t1", milk()).await.unwrap();
        repo.create_record("u2", "t1", milk()).await.unwrap();

        assert_eq!(repo.len().await, 2);
    }

    // ==================== List Tests ====================

    #[tokio::test]
    async fn test_list_empty_partition() {
        let repo = InMemoryRepository::new();
        assert!(repo.list_for_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryRepository::new();
        for id in ["t1", "t2", "t3"] {
            repo.create_record("u1", id, milk()).await.unwrap();
        }

        let todos = repo.list_for_user("u1").await.unwrap();
        assert_eq!(ids(&todos), vec!["t3", "t2", "t1"]);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_user() {
        let repo = InMemoryRepository::new();
        repo.create_record("u1", "t1", milk()).await.unwrap();
        repo.create_record("u2", "t2", milk()).await.unwrap();

        let todos = repo.list_for_user("u1").await.unwrap();
        assert_eq!(ids(&todos), vec!["t1"]);
    }

    // ==================== Update Tests ====================

    #[tokio::test]
    async fn test_update_nonexistent() {
        let repo = InMemoryRepository::new();
        let result = repo
            .update_record("u1", "t1", &UpdateTodoRequest::new("x", date(1), true))
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_overwrites_mutable_fields() {
        let repo = InMemoryRepository::new();
        let created = repo.create_record("u1", "t1", milk()).await.unwrap();

        let updated = repo
            .update_record("u1", "t1", &UpdateTodoRequest::new("Buy milk", date(2), true))
            .await
            .unwrap();

        assert!(updated.done);
        assert_eq!(updated.due_date, date(2));
        assert_eq!(updated.created_at, created.created_at);

        let stored = repo.get_record("u1", "t1").await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_done_follows_done_field_only() {
        let repo = InMemoryRepository::new();
        repo.create_record("u1", "t1", milk()).await.unwrap();

        repo.update_record("u1", "t1", &UpdateTodoRequest::new("Buy milk", date(2), true))
            .await
            .unwrap();
        let updated = repo
            .update_record("u1", "t1", &UpdateTodoRequest::new("Buy milk", date(3), false))
            .await
            .unwrap();

        assert!(!updated.done);
        assert_eq!(updated.due_date, date(3));
    }

    #[tokio::test]
    async fn test_update_keeps_attachment_url() {
        let repo = InMemoryRepository::new();
        repo.create_record("u1", "t1", milk()).await.unwrap();
        repo.set_attachment_url("u1", "t1", "https://bucket/t1")
            .await
            .unwrap();

        let updated = repo
            .update_record("u1", "t1", &UpdateTodoRequest::new("Buy milk", date(2), true))
            .await
            .unwrap();
        assert_eq!(updated.attachment_url.as_deref(), Some("https://bucket/t1"));
    }

    // ==================== Delete Tests ====================

    #[tokio::test]
    async fn test_delete_removes_from_list() {
        let repo = InMemoryRepository::new();
        repo.create_record("u1", "t1", milk()).await.unwrap();
        repo.create_record("u1", "t2", milk()).await.unwrap();

        repo.delete_record("u1", "t1").await.unwrap();

        let todos = repo.list_for_user("u1").await.unwrap();
        assert_eq!(ids(&todos), vec!["t2"]);
    }

    #[tokio::test]
    async fn test_delete_twice_fails_second_time() {
        let repo = InMemoryRepository::new();
        repo.create_record("u1", "t1", milk()).await.unwrap();

        repo.delete_record("u1", "t1").await.unwrap();
        let result = repo.delete_record("u1", "t1").await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_requires_matching_partition() {
        let repo = InMemoryRepository::new();
        repo.create_record("u1", "t1", milk()).await.unwrap();

        let result = repo.delete_record("u2", "t1").await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert_eq!(repo.len().await, 1);
    }

    // ==================== Search Tests ====================

    #[tokio::test]
    async fn test_search_substring() {
        let repo = InMemoryRepository::new();
        repo.create_record("u1", "t1", milk()).await.unwrap();
        repo.create_record("u1", "t2", CreateTodoRequest::new("Walk dog", date(1)))
            .await
            .unwrap();

        let todos = repo.search_by_name("u1", "milk").await.unwrap();
        assert_eq!(ids(&todos), vec!["t1"]);

        let todos = repo.search_by_name("u1", "Milk").await.unwrap();
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_needle_matches_list() {
        let repo = InMemoryRepository::new();
        for id in ["t1", "t2", "t3"] {
            repo.create_record("u1", id, milk()).await.unwrap();
        }

        let mut searched = ids(&repo.search_by_name("u1", "").await.unwrap())
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let mut listed = ids(&repo.list_for_user("u1").await.unwrap())
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        searched.sort();
        listed.sort();
        assert_eq!(searched, listed);
    }

    #[tokio::test]
    async fn test_search_without_match() {
        let repo = InMemoryRepository::new();
        repo.create_record("u1", "t1", milk()).await.unwrap();
        assert!(repo.search_by_name("u1", "xyz").await.unwrap().is_empty());
    }

    // ==================== Attachment Tests ====================

    #[tokio::test]
    async fn test_set_attachment_url_touches_only_url() {
        let repo = InMemoryRepository::new();
        let created = repo.create_record("u1", "t1", milk()).await.unwrap();

        let updated = repo
            .set_attachment_url("u1", "t1", "https://bucket/t1")
            .await
            .unwrap();

        assert_eq!(updated.attachment_url.as_deref(), Some("https://bucket/t1"));
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.due_date, created.due_date);
        assert_eq!(updated.done, created.done);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_set_attachment_url_nonexistent() {
        let repo = InMemoryRepository::new();
        let result = repo.set_attachment_url("u1", "t1", "https://bucket/t1").await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }
}

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use todos_core::storage::{Result, TodoRepository};
use todos_core::todo::{CreateTodoRequest, TodoItem, UpdateTodoRequest};

use super::observer::{CallOutcome, StoreObserver, StoreOperation};

/// Repository decorator reporting every call to a [`StoreObserver`].
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `O` - The observer receiving pre/post-call notifications
pub struct ObservedRepository<R, O>
where
    R: TodoRepository,
    O: StoreObserver,
{
    repository: Arc<R>,
    observer: Arc<O>,
}

impl<R, O> ObservedRepository<R, O>
where
    R: TodoRepository,
    O: StoreObserver,
{
    /// Creates a new observed repository.
    pub fn new(repository: Arc<R>, observer: Arc<O>) -> Self {
        Self {
            repository,
            observer,
        }
    }

    async fn observe<T, F>(
        &self,
        operation: StoreOperation<'_>,
        count: fn(&T) -> Option<usize>,
        call: F,
    ) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send,
        T: Send,
    {
        self.observer.before_call(&operation);
        let started = Instant::now();

        let result = call.await;

        let elapsed = started.elapsed();
        match &result {
            Ok(value) => self.observer.after_call(
                &operation,
                &CallOutcome::Success {
                    records: count(value),
                },
                elapsed,
            ),
            Err(err) => self
                .observer
                .after_call(&operation, &CallOutcome::Failure(err), elapsed),
        }
        result
    }
}

fn no_count<T>(_: &T) -> Option<usize> {
    None
}

fn count_found(todo: &Option<TodoItem>) -> Option<usize> {
    Some(usize::from(todo.is_some()))
}

#[allow(clippy::ptr_arg)]
fn count_all(todos: &Vec<TodoItem>) -> Option<usize> {
    Some(todos.len())
}

#[async_trait]
impl<R, O> TodoRepository for ObservedRepository<R, O>
where
    R: TodoRepository + 'static,
    O: StoreObserver + 'static,
{
    async fn get_record(&self, user_id: &str, todo_id: &str) -> Result<Option<TodoItem>> {
        self.observe(
            StoreOperation::record("get_record", user_id, todo_id),
            count_found,
            self.repository.get_record(user_id, todo_id),
        )
        .await
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        self.observe(
            StoreOperation::partition("list_for_user", user_id),
            count_all,
            self.repository.list_for_user(user_id),
        )
        .await
    }

    async fn create_record(
        &self,
        user_id: &str,
        todo_id: &str,
        fields: CreateTodoRequest,
    ) -> Result<TodoItem> {
        self.observe(
            StoreOperation::record("create_record", user_id, todo_id),
            no_count,
            self.repository.create_record(user_id, todo_id, fields),
        )
        .await
    }

    async fn update_record(
        &self,
        user_id: &str,
        todo_id: &str,
        fields: &UpdateTodoRequest,
    ) -> Result<TodoItem> {
        self.observe(
            StoreOperation::record("update_record", user_id, todo_id),
            no_count,
            self.repository.update_record(user_id, todo_id, fields),
        )
        .await
    }

    async fn delete_record(&self, user_id: &str, todo_id: &str) -> Result<()> {
        self.observe(
            StoreOperation::record("delete_record", user_id, todo_id),
            no_count,
            self.repository.delete_record(user_id, todo_id),
        )
        .await
    }

    async fn search_by_name(&self, user_id: &str, needle: &str) -> Result<Vec<TodoItem>> {
        self.observe(
            StoreOperation::partition("search_by_name", user_id),
            count_all,
            self.repository.search_by_name(user_id, needle),
        )
        .await
    }

    async fn set_attachment_url(
        &self,
        user_id: &str,
        todo_id: &str,
        url: &str,
    ) -> Result<TodoItem> {
        self.observe(
            StoreOperation::record("set_attachment_url", user_id, todo_id),
            no_count,
            self.repository.set_attachment_url(user_id, todo_id, url),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::NaiveDate;
    use todos_core::storage::RepositoryError;

    use crate::storage::inmemory::InMemoryRepository;
    use crate::storage::observed::TracingObserver;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Recorded {
        phase: &'static str,
        operation: &'static str,
        todo_id: Option<String>,
        success: Option<bool>,
        records: Option<usize>,
    }

    #[derive(Default)]
    struct RecordingObserver {
        calls: Mutex<Vec<Recorded>>,
    }

    impl RecordingObserver {
        fn calls(&self) -> Vec<Recorded> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl StoreObserver for RecordingObserver {
        fn before_call(&self, operation: &StoreOperation<'_>) {
            self.calls.lock().unwrap().push(Recorded {
                phase: "before",
                operation: operation.name,
                todo_id: operation.todo_id.map(str::to_string),
                success: None,
                records: None,
            });
        }

        fn after_call(
            &self,
            operation: &StoreOperation<'_>,
            outcome: &CallOutcome<'_>,
            _elapsed: Duration,
        ) {
            let records = match outcome {
                CallOutcome::Success { records } => *records,
                CallOutcome::Failure(_) => None,
            };
            self.calls.lock().unwrap().push(Recorded {
                phase: "after",
                operation: operation.name,
                todo_id: operation.todo_id.map(str::to_string),
                success: Some(outcome.is_success()),
                records,
            });
        }
    }

    fn setup() -> (
        ObservedRepository<InMemoryRepository, RecordingObserver>,
        Arc<RecordingObserver>,
    ) {
        let observer = Arc::new(RecordingObserver::default());
        let repo = ObservedRepository::new(Arc::new(InMemoryRepository::new()), observer.clone());
        (repo, observer)
    }

    fn milk() -> CreateTodoRequest {
        CreateTodoRequest::new("Buy milk", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[tokio::test]
    async fn test_observer_sees_before_and_after() {
        let (repo, observer) = setup();

        repo.create_record("u1", "t1", milk()).await.unwrap();

        let calls = observer.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].phase, "before");
        assert_eq!(calls[0].operation, "create_record");
        assert_eq!(calls[0].todo_id.as_deref(), Some("t1"));
        assert_eq!(calls[1].phase, "after");
        assert_eq!(calls[1].success, Some(true));
    }

    #[tokio::test]
    async fn test_observer_counts_listed_records() {
        let (repo, observer) = setup();
        repo.create_record("u1", "t1", milk()).await.unwrap();
        repo.create_record("u1", "t2", milk()).await.unwrap();

        let todos = repo.list_for_user("u1").await.unwrap();

        assert_eq!(todos.len(), 2);
        let last = observer.calls().pop().unwrap();
        assert_eq!(last.operation, "list_for_user");
        assert_eq!(last.todo_id, None);
        assert_eq!(last.records, Some(2));
    }

    #[tokio::test]
    async fn test_failures_pass_through_unchanged() {
        let (repo, observer) = setup();

        let result = repo.delete_record("u1", "missing").await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        let last = observer.calls().pop().unwrap();
        assert_eq!(last.operation, "delete_record");
        assert_eq!(last.success, Some(false));
    }

    #[tokio::test]
    async fn test_tracing_observer_does_not_alter_results() {
        let repo = ObservedRepository::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(TracingObserver),
        );

        let created = repo.create_record("u1", "t1", milk()).await.unwrap();
        let fetched = repo.get_record("u1", "t1").await.unwrap();
        assert_eq!(fetched, Some(created));

        let conflict = repo.create_record("u1", "t1", milk()).await;
        assert!(matches!(conflict, Err(RepositoryError::AlreadyExists { .. })));
    }
}

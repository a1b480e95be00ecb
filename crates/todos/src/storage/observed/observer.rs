use std::time::Duration;

use todos_core::storage::RepositoryError;

/// Describes a single record store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOperation<'a> {
    /// Operation name, e.g. `"create_record"`.
    pub name: &'static str,
    pub user_id: &'a str,
    /// Absent for partition-wide operations.
    pub todo_id: Option<&'a str>,
}

impl<'a> StoreOperation<'a> {
    /// An operation addressing a whole partition.
    pub fn partition(name: &'static str, user_id: &'a str) -> Self {
        Self {
            name,
            user_id,
            todo_id: None,
        }
    }

    /// An operation addressing a single record.
    pub fn record(name: &'static str, user_id: &'a str, todo_id: &'a str) -> Self {
        Self {
            name,
            user_id,
            todo_id: Some(todo_id),
        }
    }
}

/// Result of a store call as seen by observers.
#[derive(Debug, Clone, Copy)]
pub enum CallOutcome<'a> {
    /// The call succeeded. `records` is set for reads returning sequences.
    Success { records: Option<usize> },
    Failure(&'a RepositoryError),
}

impl CallOutcome<'_> {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success { .. })
    }
}

/// Hook points around record store calls.
///
/// Both methods default to doing nothing.
pub trait StoreObserver: Send + Sync {
    /// Called before the call is sent to the store.
    fn before_call(&self, _operation: &StoreOperation<'_>) {}

    /// Called once the store answered, successfully or not.
    fn after_call(
        &self,
        _operation: &StoreOperation<'_>,
        _outcome: &CallOutcome<'_>,
        _elapsed: Duration,
    ) {
    }
}

/// Emits structured `tracing` events for every store call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StoreObserver for TracingObserver {
    fn before_call(&self, operation: &StoreOperation<'_>) {
        tracing::trace!(
            operation = operation.name,
            user_id = operation.user_id,
            todo_id = operation.todo_id,
            "Store call started"
        );
    }

    fn after_call(
        &self,
        operation: &StoreOperation<'_>,
        outcome: &CallOutcome<'_>,
        elapsed: Duration,
    ) {
        let elapsed_ms = elapsed.as_millis() as u64;
        match outcome {
            CallOutcome::Success { records } => {
                tracing::debug!(
                    operation = operation.name,
                    user_id = operation.user_id,
                    todo_id = operation.todo_id,
                    records = *records,
                    elapsed_ms,
                    "Store call succeeded"
                );
            }
            CallOutcome::Failure(err) if err.is_not_found() || err.is_conflict() => {
                tracing::info!(
                    operation = operation.name,
                    user_id = operation.user_id,
                    todo_id = operation.todo_id,
                    error = %err,
                    elapsed_ms,
                    "Store call rejected"
                );
            }
            CallOutcome::Failure(err) if err.is_retryable() => {
                tracing::warn!(
                    operation = operation.name,
                    user_id = operation.user_id,
                    todo_id = operation.todo_id,
                    error = %err,
                    elapsed_ms,
                    "Store unavailable"
                );
            }
            CallOutcome::Failure(err) => {
                tracing::error!(
                    operation = operation.name,
                    user_id = operation.user_id,
                    todo_id = operation.todo_id,
                    error = %err,
                    elapsed_ms,
                    "Store call failed"
                );
            }
        }
    }
}

use thiserror::Error;

/// Errors raised when a task violates a record-level invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("Todo name cannot be empty")]
    EmptyName,
    #[error("Todo name too long (max {max} characters)")]
    NameTooLong { max: usize },
    #[error("User ID cannot be empty")]
    EmptyUserId,
    #[error("Todo ID cannot be empty")]
    EmptyTodoId,
}

//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! The HTTP layer itself lives outside this workspace; it calls these to
//! translate typed failures into responses.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `Unavailable` -> 503 (Service Unavailable, retryable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `InvalidData` -> 500 (Internal Server Error, a stored item is corrupt)
///
/// # Examples
///
/// ```
/// use todos_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Todo",
///     id: "user-1/todo-1".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::Unavailable(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::InvalidData(_) => 500,
    }
}

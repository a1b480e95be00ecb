use thiserror::Error;

use todos_core::attachment::{attachment_error_to_status_code, AttachmentError};
use todos_core::storage::{repository_error_to_status_code, RepositoryError};
use todos_core::todo::TodoError;

/// Errors surfaced by [`TodoService`](super::TodoService).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] TodoError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}

impl ServiceError {
    /// Maps the error to an HTTP status code.
    ///
    /// Validation failures are 400; the others delegate to the core mappings.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::Repository(e) => repository_error_to_status_code(e),
            ServiceError::Attachment(e) => attachment_error_to_status_code(e),
        }
    }

    /// Returns true when the same call may succeed if retried later.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Repository(e) => e.is_retryable(),
            ServiceError::Attachment(AttachmentError::Signing(_)) => true,
            _ => false,
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

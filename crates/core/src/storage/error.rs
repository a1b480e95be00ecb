use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The targeted key does not exist.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    /// A create targeted a key that already exists.
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    /// The store could not be reached or throttled the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// A stored item could not be decoded.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Returns true when the same call may succeed if retried later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepositoryError::Unavailable(_))
    }

    /// Returns true for [`RepositoryError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    /// Returns true for [`RepositoryError::AlreadyExists`].
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::AlreadyExists { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Todo",
            id: "u1/t1".to_string(),
        };
        assert_eq!(error.to_string(), "Todo not found: u1/t1");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Todo",
            id: "u1/t1".to_string(),
        };
        assert_eq!(error.to_string(), "Todo already exists: u1/t1");
    }

    #[test]
    fn test_repository_error_unavailable_display() {
        let error = RepositoryError::Unavailable("Throughput exceeded".to_string());
        assert_eq!(error.to_string(), "Store unavailable: Throughput exceeded");
    }

    #[test]
    fn test_only_unavailable_is_retryable() {
        assert!(RepositoryError::Unavailable("timeout".to_string()).is_retryable());
        assert!(!RepositoryError::QueryFailed("bad".to_string()).is_retryable());
        assert!(!RepositoryError::NotFound {
            entity_type: "Todo",
            id: "x".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_classification_helpers() {
        let not_found = RepositoryError::NotFound {
            entity_type: "Todo",
            id: "x".to_string(),
        };
        let conflict = RepositoryError::AlreadyExists {
            entity_type: "Todo",
            id: "x".to_string(),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_conflict());
        assert!(conflict.is_conflict());
    }
}

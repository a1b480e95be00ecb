use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while issuing attachment URLs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("Failed to sign upload URL: {0}")]
    Signing(String),
    #[error("Invalid upload URL expiry: {0:?} (must be between 1 second and 7 days)")]
    InvalidExpiry(Duration),
}

/// Maps an [`AttachmentError`] to an HTTP status code.
///
/// - `Signing` -> 502 (Bad Gateway, the object store failed)
/// - `InvalidExpiry` -> 500 (misconfiguration)
pub fn attachment_error_to_status_code(error: &AttachmentError) -> u16 {
    match error {
        AttachmentError::Signing(_) => 502,
        AttachmentError::InvalidExpiry(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_error_display() {
        let error = AttachmentError::Signing("credentials expired".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to sign upload URL: credentials expired"
        );
        assert_eq!(attachment_error_to_status_code(&error), 502);
    }

    #[test]
    fn test_invalid_expiry_status() {
        let error = AttachmentError::InvalidExpiry(Duration::ZERO);
        assert_eq!(attachment_error_to_status_code(&error), 500);
    }
}

//! Deterministic object-store naming for task attachments.
//!
//! Pure functions only: the object key and the public URL of an attachment
//! are derived from the task ID and the configured bucket, without any
//! network access.

use std::time::Duration;

use super::AttachmentError;

/// Longest lifetime accepted for an upload URL (S3 SigV4 limit).
pub const MAX_UPLOAD_URL_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default lifetime of an upload URL.
pub const DEFAULT_UPLOAD_URL_EXPIRY: Duration = Duration::from_secs(300);

/// Maps task IDs to object keys and public URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentResolver {
    bucket: String,
    key_prefix: String,
    public_base_url: Option<String>,
}

impl AttachmentResolver {
    /// Creates a resolver for `bucket`, using the task ID as the object key.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key_prefix: String::new(),
            public_base_url: None,
        }
    }

    /// Namespaces every object key under `prefix`.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Serves public URLs from `base_url` instead of the bucket's S3 host.
    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.public_base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// Get the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns the object key holding the attachment of `todo_id`.
    pub fn object_key(&self, todo_id: &str) -> String {
        format!("{}{}", self.key_prefix, todo_id)
    }

    /// Returns the public retrieval URL of the attachment of `todo_id`.
    ///
    /// Each path segment of the key is percent-encoded; `/` separators in
    /// the prefix are kept.
    pub fn public_url(&self, todo_id: &str) -> String {
        let encoded = encode_object_key(&self.object_key(todo_id));

        match &self.public_base_url {
            Some(base) => format!("{base}/{encoded}"),
            None => format!("https://{}.s3.amazonaws.com/{encoded}", self.bucket),
        }
    }
}

/// Percent-encodes each `/`-separated segment of an object key.
pub fn encode_object_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Checks that an upload URL lifetime is within the accepted range.
pub fn validate_expiry(expires_in: Duration) -> Result<(), AttachmentError> {
    if expires_in < Duration::from_secs(1) || expires_in > MAX_UPLOAD_URL_EXPIRY {
        return Err(AttachmentError::InvalidExpiry(expires_in));
    }
    Ok(())
}

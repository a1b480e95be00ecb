use std::time::Duration;

use async_trait::async_trait;

use super::AttachmentError;

/// Object-store capability issuing time-limited upload URLs.
///
/// The core only supplies the object key and consumes the returned URL;
/// signing itself belongs to the object store.
#[async_trait]
pub trait UploadUrlSigner: Send + Sync {
    /// Returns a URL allowing a single `PUT` of `object_key` for `expires_in`.
    async fn presign_put(
        &self,
        object_key: &str,
        expires_in: Duration,
    ) -> Result<String, AttachmentError>;
}

use std::time::Duration;

use async_trait::async_trait;
use todos_core::attachment::{encode_object_key, validate_expiry, AttachmentError, UploadUrlSigner};

/// Signer producing unsigned, deterministic upload URLs.
///
/// Intended for tests and for local object stores that accept anonymous
/// writes. The URL is `{base_url}/{key}?X-Amz-Expires={seconds}`, with the
/// key encoded the same way as public attachment URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticUploadSigner {
    base_url: String,
}

impl StaticUploadSigner {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl UploadUrlSigner for StaticUploadSigner {
    async fn presign_put(
        &self,
        object_key: &str,
        expires_in: Duration,
    ) -> Result<String, AttachmentError> {
        validate_expiry(expires_in)?;
        Ok(format!(
            "{}/{}?X-Amz-Expires={}",
            self.base_url,
            encode_object_key(object_key),
            expires_in.as_secs()
        ))
    }
}

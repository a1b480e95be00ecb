//! S3 presigned upload URLs.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use todos_core::attachment::{validate_expiry, AttachmentError, UploadUrlSigner};

/// Issues presigned `PUT` URLs for objects of a single bucket.
pub struct S3UploadSigner {
    client: Client,
    bucket: String,
}

impl std::fmt::Debug for S3UploadSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3UploadSigner")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl S3UploadSigner {
    /// Creates a signer with the given S3 client and bucket.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Creates a signer from an already loaded AWS SDK configuration.
    ///
    /// Path-style addressing is used when a custom endpoint is configured,
    /// which local S3 emulators require.
    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig, bucket: &str) -> Self {
        let force_path_style = sdk_config.endpoint_url().is_some();
        let config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(force_path_style)
            .build();
        Self::new(Client::from_conf(config), bucket)
    }

    /// Get the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl UploadUrlSigner for S3UploadSigner {
    async fn presign_put(
        &self,
        object_key: &str,
        expires_in: Duration,
    ) -> Result<String, AttachmentError> {
        validate_expiry(expires_in)?;

        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| AttachmentError::Signing(DisplayErrorContext(&e).to_string()))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(object_key)
            .presigned(presigning)
            .await
            .map_err(|e| AttachmentError::Signing(DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }
}

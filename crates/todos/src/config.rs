use std::{env, time::Duration};

use todos_core::attachment::AttachmentResolver;
use todos_core::storage::schema::{DEFAULT_CREATED_AT_INDEX, DEFAULT_TABLE_NAME};
use todos_core::storage::{todos_table_config, TableConfig};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Table holding task records (default: "todos")
    pub table_name: String,
    /// Local secondary index ordering records by creation time (default: "CreatedAtIndex")
    pub created_at_index: String,
    /// Bucket receiving attachments (default: "todos-attachments")
    pub attachment_bucket: String,
    /// Prefix prepended to every attachment object key (default: empty)
    pub attachment_key_prefix: String,
    /// Base URL of public attachment links (default: derived from the bucket)
    pub attachment_base_url: Option<String>,
    /// Upload URL lifetime in seconds (default: 300)
    pub upload_url_expiry_seconds: u64,
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// Custom endpoint for local DynamoDB / S3 (default: unset)
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TODOS_TABLE` - Table name (default: "todos")
    /// - `TODOS_CREATED_AT_INDEX` - Creation-time index (default: "CreatedAtIndex")
    /// - `ATTACHMENT_S3_BUCKET` - Attachment bucket (default: "todos-attachments")
    /// - `ATTACHMENT_KEY_PREFIX` - Object key prefix (default: empty)
    /// - `ATTACHMENT_BASE_URL` - Public URL base (default: unset)
    /// - `SIGNED_URL_EXPIRATION` - Upload URL lifetime in seconds (default: 300)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - Custom endpoint (default: unset)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            table_name: non_empty("TODOS_TABLE").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            created_at_index: non_empty("TODOS_CREATED_AT_INDEX")
                .unwrap_or_else(|| DEFAULT_CREATED_AT_INDEX.to_string()),
            attachment_bucket: non_empty("ATTACHMENT_S3_BUCKET")
                .unwrap_or_else(|| "todos-attachments".to_string()),
            attachment_key_prefix: lookup("ATTACHMENT_KEY_PREFIX").unwrap_or_default(),
            attachment_base_url: non_empty("ATTACHMENT_BASE_URL"),
            upload_url_expiry_seconds: lookup("SIGNED_URL_EXPIRATION")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(300),
            region: non_empty("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            endpoint_url: non_empty("AWS_ENDPOINT_URL"),
        }
    }

    /// Get the upload URL lifetime as a Duration.
    pub fn upload_url_expiry(&self) -> Duration {
        Duration::from_secs(self.upload_url_expiry_seconds)
    }

    /// Builds the attachment resolver described by this configuration.
    pub fn attachment_resolver(&self) -> AttachmentResolver {
        let resolver = AttachmentResolver::new(&self.attachment_bucket)
            .with_key_prefix(&self.attachment_key_prefix);

        match &self.attachment_base_url {
            Some(base_url) => resolver.with_public_base_url(base_url),
            None => resolver,
        }
    }

    /// Returns the expected table schema.
    pub fn table_config(&self) -> TableConfig {
        todos_table_config()
            .with_table_name(&self.table_name)
            .with_created_at_index(&self.created_at_index)
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("local endpoint ({url})"),
            None => format!("AWS (region: {})", self.region),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

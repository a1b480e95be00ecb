//! AWS SDK configuration loading (Imperative Shell).

use aws_config::retry::RetryConfig;

use crate::config::Config;

/// Region and endpoint used to reach AWS services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    /// AWS region.
    pub region: String,
    /// Custom endpoint URL (for local DynamoDB / S3).
    pub endpoint_url: Option<String>,
}

impl From<&Config> for AwsSettings {
    fn from(config: &Config) -> Self {
        Self {
            region: config.region.clone(),
            endpoint_url: config.endpoint_url.clone(),
        }
    }
}

/// Loads the shared SDK configuration, honouring the endpoint override.
///
/// SDK retries are disabled. Each store call is sent once and its failure
/// goes straight to the caller.
pub async fn load_sdk_config(settings: &AwsSettings) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.region.clone()))
        .retry_config(RetryConfig::disabled());

    if let Some(endpoint) = &settings.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

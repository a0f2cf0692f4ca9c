//! Shared AWS configuration context
//!
//! Provides `AwsContext` for loading AWS SDK configuration once and
//! creating service clients from the same config.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;

/// Shared AWS configuration context for creating service clients.
///
/// This struct holds a loaded AWS SDK config and provides methods
/// to create service clients without re-loading configuration.
///
/// # Example
/// ```ignore
/// let aws = AwsContext::new("us-west-2").await;
/// let api = RecoveryControlClient::from_context(&aws);
/// ```
#[derive(Clone)]
pub struct AwsContext {
    config: Arc<SdkConfig>,
    region: String,
}

impl AwsContext {
    /// Load AWS configuration for the specified region.
    ///
    /// This loads credentials, region configuration, and other AWS SDK
    /// settings from the environment, config files, and IAM roles.
    pub async fn new(region: &str) -> Self {
        Self::load(region, None, None).await
    }

    /// Load AWS configuration with an optional named profile.
    pub async fn with_profile(region: &str, profile: Option<&str>) -> Self {
        Self::load(region, profile, None).await
    }

    /// Load AWS configuration with an optional profile and endpoint override.
    ///
    /// The endpoint override points the service client at a different URL,
    /// e.g. a FIPS endpoint or a local stand-in.
    pub async fn load(region: &str, profile: Option<&str>, endpoint_url: Option<&str>) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }

        Self {
            config: Arc::new(loader.load().await),
            region: region.to_string(),
        }
    }

    /// Get the underlying SDK config for direct client construction.
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    /// Get the region string.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Create a Route 53 Recovery Control Config client from this context.
    pub fn recovery_control_client(&self) -> aws_sdk_route53recoverycontrolconfig::Client {
        aws_sdk_route53recoverycontrolconfig::Client::new(self.sdk_config())
    }
}

impl std::fmt::Debug for AwsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsContext")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

/// Types that can be built from a loaded [`AwsContext`]
pub trait FromAwsContext {
    fn from_context(ctx: &AwsContext) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: These tests require AWS credentials and are marked as integration tests
    // They are skipped in regular test runs

    #[tokio::test]
    #[ignore = "requires AWS credentials"]
    async fn test_context_creation() {
        let ctx = AwsContext::new("us-west-2").await;
        assert_eq!(ctx.region(), "us-west-2");
    }

    #[tokio::test]
    #[ignore = "requires AWS credentials"]
    async fn test_context_clone() {
        let ctx1 = AwsContext::new("us-west-2").await;
        let ctx2 = ctx1.clone();

        // Both should point to the same Arc'd config
        assert_eq!(ctx1.region(), ctx2.region());
    }
}

//! Provider configuration

use crate::wait::WaitConfig;
use recovery_control_common::defaults::{
    DEFAULT_MAX_POLL_INTERVAL_SECS, default_poll_interval, default_region, default_wait_timeout,
};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("region must not be empty")]
    EmptyRegion,

    #[error("endpoint URL must not be empty when given")]
    EmptyEndpoint,

    #[error("wait timeout must be greater than 0")]
    ZeroTimeout,

    #[error("poll interval must be greater than 0")]
    ZeroPollInterval,

    #[error("poll interval ({poll}s) must not exceed the wait timeout ({timeout}s)")]
    PollExceedsTimeout { poll: u64, timeout: u64 },
}

/// AWS connection settings
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// AWS region
    pub region: String,
    /// AWS profile name (overrides default credential resolution)
    pub aws_profile: Option<String>,
    /// Endpoint override for the Recovery Control Config API
    pub endpoint_url: Option<String>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            aws_profile: None,
            endpoint_url: None,
        }
    }
}

/// Waiter timing, in seconds
#[derive(Debug, Clone)]
pub struct WaitSettings {
    /// Give up waiting for a status transition after this long
    pub timeout_secs: u64,
    /// First delay between describe calls
    pub poll_interval_secs: u64,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_wait_timeout(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl WaitSettings {
    /// Backoff configuration for the status waiters.
    ///
    /// Delays start at the poll interval and double up to
    /// `DEFAULT_MAX_POLL_INTERVAL_SECS`, never below the poll interval itself.
    pub fn wait_config(&self) -> WaitConfig {
        let max_delay = self.poll_interval_secs.max(DEFAULT_MAX_POLL_INTERVAL_SECS);
        WaitConfig {
            initial_delay: Duration::from_secs(self.poll_interval_secs),
            max_delay: Duration::from_secs(max_delay),
            timeout: Duration::from_secs(self.timeout_secs),
            jitter: true,
        }
    }
}

/// Complete provider configuration
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub aws: AwsConfig,
    pub wait: WaitSettings,
}

impl ProviderConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aws.region.trim().is_empty() {
            return Err(ConfigError::EmptyRegion);
        }

        if self
            .aws
            .endpoint_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            return Err(ConfigError::EmptyEndpoint);
        }

        if self.wait.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        if self.wait.poll_interval_secs == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }

        if self.wait.poll_interval_secs > self.wait.timeout_secs {
            return Err(ConfigError::PollExceedsTimeout {
                poll: self.wait.poll_interval_secs,
                timeout: self.wait.timeout_secs,
            });
        }

        Ok(())
    }

    pub fn region(&self) -> &str {
        &self.aws.region
    }

    pub fn aws_profile(&self) -> Option<&str> {
        self.aws.aws_profile.as_deref()
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.aws.endpoint_url.as_deref()
    }
}

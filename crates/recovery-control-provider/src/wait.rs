//! Resource waiting with exponential backoff and cancellation support.
//!
//! Provides a generic abstraction for waiting on AWS resources (or any async condition)
//! to reach a target state, with configurable exponential backoff, jitter, and cancellation.

use anyhow::Result;
use backon::{BackoffBuilder, ExponentialBuilder};
use recovery_control_common::defaults::{
    DEFAULT_MAX_POLL_INTERVAL_SECS, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_WAIT_TIMEOUT_SECS,
};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Configuration for resource waiting with exponential backoff.
#[derive(Debug, Clone)]
pub struct WaitConfig {
    /// Initial delay between checks
    pub initial_delay: Duration,
    /// Maximum delay between checks (cap for exponential growth)
    pub max_delay: Duration,
    /// Maximum total time to wait before timeout
    pub timeout: Duration,
    /// Add randomness to delays
    pub jitter: bool,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_delay: Duration::from_secs(DEFAULT_MAX_POLL_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
            jitter: true,
        }
    }
}

/// Why a wait ended without the resource becoming ready
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("Timeout waiting for {resource} after {timeout:?} ({attempts} attempts)")]
    Timeout {
        resource: String,
        timeout: Duration,
        attempts: u32,
    },

    #[error("Wait for {resource} cancelled")]
    Cancelled { resource: String },
}

/// Wait for a resource to become ready with exponential backoff.
///
/// Uses `backon::ExponentialBuilder` for delay calculation and `tokio::select!`
/// for cancellation support.
///
/// # Arguments
/// * `config` - Wait configuration
/// * `cancel` - Optional cancellation token
/// * `check` - Async function that returns `Ok(true)` when ready, `Ok(false)` to retry
/// * `resource_name` - Name for logging
///
/// # Returns
/// * `Ok(())` - Resource is ready
/// * `Err` - [`WaitError`] on timeout or cancellation, or the error returned by `check`
///
/// # Example
/// ```ignore
/// wait_for_resource(
///     WaitConfig::default(),
///     Some(&cancel_token),
///     || async {
///         let deployed = check_if_deployed().await?;
///         Ok(deployed)
///     },
///     "control panel",
/// ).await?;
/// ```
pub async fn wait_for_resource<F, Fut>(
    config: &WaitConfig,
    cancel: Option<&CancellationToken>,
    check: F,
    resource_name: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = std::time::Instant::now();
    let mut attempts = 0u32;

    let mut builder = ExponentialBuilder::default()
        .with_min_delay(config.initial_delay)
        .with_max_delay(config.max_delay)
        .with_factor(2.0)
        .without_max_times();
    if config.jitter {
        builder = builder.with_jitter();
    }

    let mut delays = builder.build();

    loop {
        attempts += 1;

        // Check cancellation before each attempt
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(WaitError::Cancelled {
                resource: resource_name.to_string(),
            }
            .into());
        }

        // Check timeout
        if start.elapsed() >= config.timeout {
            return Err(WaitError::Timeout {
                resource: resource_name.to_string(),
                timeout: config.timeout,
                attempts,
            }
            .into());
        }

        // Run the check
        match check().await {
            Ok(true) => {
                debug!(resource = %resource_name, attempts, "Resource ready");
                return Ok(());
            }
            Ok(false) => {
                let delay = delays.next().unwrap_or(config.max_delay);
                debug!(
                    resource = %resource_name,
                    attempt = attempts,
                    delay_ms = delay.as_millis(),
                    "Resource not ready, retrying"
                );

                // Wait with cancellation support
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = async {
                        if let Some(token) = cancel {
                            token.cancelled().await
                        } else {
                            std::future::pending::<()>().await
                        }
                    } => {
                        return Err(WaitError::Cancelled {
                            resource: resource_name.to_string(),
                        }
                        .into());
                    }
                }
            }
            Err(e) => {
                warn!(resource = %resource_name, error = ?e, "Resource check failed");
                return Err(e);
            }
        }
    }
}

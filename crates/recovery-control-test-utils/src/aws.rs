//! AWS test utilities
//!
//! Provides region detection, cluster lookup and unique resource names for
//! the live integration tests.

use chrono::Utc;

/// Environment variable holding the ARN of an existing cluster to test against
pub const TEST_CLUSTER_ARN_VAR: &str = "RECOVERY_CONTROL_TEST_CLUSTER_ARN";

/// Resource names the service accepts are at most this long
const MAX_NAME_LEN: usize = 64;

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to us-west-2, the only Recovery Control Config control plane region
///
/// # Example
///
/// ```
/// use recovery_control_test_utils::aws::get_test_region;
///
/// let region = get_test_region();
/// assert!(!region.is_empty());
/// ```
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "us-west-2".to_string())
}

/// ARN of the cluster the integration tests create resources in.
///
/// Clusters are slow and costly to provision, so tests reuse one supplied
/// through [`TEST_CLUSTER_ARN_VAR`] and skip when it is unset.
pub fn test_cluster_arn() -> Option<String> {
    std::env::var(TEST_CLUSTER_ARN_VAR)
        .ok()
        .filter(|arn| !arn.trim().is_empty())
}

/// Generate a unique run ID for test resources.
///
/// Format: `test-{timestamp_ms}-{counter}`.
///
/// # Example
///
/// ```
/// use recovery_control_test_utils::aws::test_run_id;
///
/// let run_id = test_run_id();
/// assert!(run_id.starts_with("test-"));
/// ```
pub fn test_run_id() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let ts = Utc::now().timestamp_millis();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("test-{}-{}", ts, counter)
}

/// Unique resource name with the given prefix, truncated to the service limit.
///
/// ```
/// use recovery_control_test_utils::aws::test_resource_name;
///
/// let name = test_resource_name("panel");
/// assert!(name.starts_with("panel-test-"));
/// assert!(name.len() <= 64);
/// ```
pub fn test_resource_name(prefix: &str) -> String {
    let mut name = format!("{prefix}-{}", test_run_id());
    name.truncate(MAX_NAME_LEN);
    name
}

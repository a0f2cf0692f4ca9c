//! Default configuration values shared between the provider and its CLI
//!
//! These constants ensure consistent defaults across all recovery-control components.

/// Default AWS region.
///
/// The Recovery Control Config control plane is only served from us-west-2.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Default time to wait for a resource to reach its target status (1 minute)
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 60;

/// Default delay before the first status poll
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Cap for the exponential poll delay
pub const DEFAULT_MAX_POLL_INTERVAL_SECS: u64 = 15;

/// Maximum length accepted by the service for client idempotency tokens
pub const CLIENT_TOKEN_MAX_LEN: usize = 64;

/// Maximum length of a control panel or routing control name
pub const NAME_MAX_LEN: usize = 64;

// Serde default functions for struct field defaults

/// Returns the default region
pub fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

/// Returns the default wait timeout
pub fn default_wait_timeout() -> u64 {
    DEFAULT_WAIT_TIMEOUT_SECS
}

/// Returns the default poll interval
pub fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

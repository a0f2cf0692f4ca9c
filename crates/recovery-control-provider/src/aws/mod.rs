//! AWS client modules for the provider
//!
//! This module wraps the Route 53 Recovery Control Config SDK client:
//! - context: shared SDK configuration
//! - client: SDK-backed implementation of [`RecoveryControlApi`]
//! - operations: mockable trait used by the resource handlers
//! - error: classification of service failures

pub mod client;
pub mod context;
pub mod error;
pub mod operations;
pub mod types;

pub use client::RecoveryControlClient;
pub use context::{AwsContext, FromAwsContext};
pub use error::{AwsError, classify_aws_error, find_aws_error, ignore_not_found, is_not_found};
#[cfg(test)]
pub use operations::MockRecoveryControlApi;
pub use operations::RecoveryControlApi;
pub use types::{
    ControlPanelDescription, CreateControlPanelRequest, CreateRoutingControlRequest,
    RoutingControlDescription,
};

//! Recovery Control Config operations trait for testing

use super::types::{
    ControlPanelDescription, CreateControlPanelRequest, CreateRoutingControlRequest,
    RoutingControlDescription,
};
use anyhow::Result;

/// Trait for Recovery Control Config operations that can be mocked in tests.
///
/// This trait abstracts the SDK client so the resource handlers can be unit
/// tested without hitting real AWS. Failures carry a classified
/// [`AwsError`](super::error::AwsError) in their chain.
///
/// Create and describe calls return `Ok(None)` when the service answers
/// without a resource body.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait RecoveryControlApi: Send + Sync {
    /// CreateControlPanel
    async fn create_control_panel(
        &self,
        request: CreateControlPanelRequest,
    ) -> Result<Option<ControlPanelDescription>>;

    /// DescribeControlPanel
    async fn describe_control_panel(&self, arn: &str) -> Result<Option<ControlPanelDescription>>;

    /// UpdateControlPanel (rename)
    async fn update_control_panel(&self, arn: &str, name: &str) -> Result<()>;

    /// DeleteControlPanel
    async fn delete_control_panel(&self, arn: &str) -> Result<()>;

    /// CreateRoutingControl
    async fn create_routing_control(
        &self,
        request: CreateRoutingControlRequest,
    ) -> Result<Option<RoutingControlDescription>>;

    /// DescribeRoutingControl
    async fn describe_routing_control(
        &self,
        arn: &str,
    ) -> Result<Option<RoutingControlDescription>>;

    /// UpdateRoutingControl (rename)
    async fn update_routing_control(&self, arn: &str, name: &str) -> Result<()>;

    /// DeleteRoutingControl
    async fn delete_routing_control(&self, arn: &str) -> Result<()>;
}

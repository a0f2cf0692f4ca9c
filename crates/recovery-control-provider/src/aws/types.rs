//! Request and response types for Recovery Control Config operations
//!
//! These mirror the SDK shapes the provider uses, decoupled from the SDK so
//! that handlers can be exercised against a mocked API.

use recovery_control_common::ResourceStatus;

/// Parameters for CreateControlPanel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateControlPanelRequest {
    /// Idempotency token
    pub client_token: String,
    pub cluster_arn: String,
    pub name: String,
}

/// Parameters for CreateRoutingControl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoutingControlRequest {
    /// Idempotency token
    pub client_token: String,
    pub cluster_arn: String,
    pub name: String,
    /// Target control panel; the cluster's default panel is used when unset
    pub control_panel_arn: Option<String>,
}

/// A control panel as reported by the service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlPanelDescription {
    pub control_panel_arn: Option<String>,
    pub cluster_arn: Option<String>,
    pub name: Option<String>,
    pub default_control_panel: bool,
    pub routing_control_count: i32,
    pub status: Option<ResourceStatus>,
}

/// A routing control as reported by the service
///
/// The service does not echo the cluster ARN for routing controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingControlDescription {
    pub routing_control_arn: Option<String>,
    pub control_panel_arn: Option<String>,
    pub name: Option<String>,
    pub status: Option<ResourceStatus>,
}

//! Locally recorded resource state

use super::error::ResourceError;
use crate::aws::{ControlPanelDescription, RoutingControlDescription};
use anyhow::Result;
use recovery_control_common::{ResourceKind, ResourceStatus};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// State of one managed resource.
///
/// `id` holds the resource ARN once created; `None` means the resource does
/// not exist (never created, deleted, or vanished out of band).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState<A> {
    pub id: Option<String>,

    /// Set while the resource is being created in this run, so a missing
    /// remote object is reported instead of silently dropped
    #[serde(skip)]
    pub is_new: bool,

    #[serde(flatten)]
    pub attributes: A,
}

impl<A: Default> ResourceState<A> {
    /// State for an existing resource known only by its identifier
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            is_new: false,
            attributes: A::default(),
        }
    }
}

impl<A> ResourceState<A> {
    /// State for a resource the current run has just created
    pub fn created(id: impl Into<String>, attributes: A) -> Self {
        Self {
            id: Some(id.into()),
            is_new: true,
            attributes,
        }
    }

    /// The identifier, or an error when there is none
    pub fn require_id(&self, kind: ResourceKind) -> Result<&str, ResourceError> {
        self.id.as_deref().ok_or(ResourceError::MissingId { kind })
    }

    /// Whether the resource has been removed from state
    pub fn is_gone(&self) -> bool {
        self.id.is_none()
    }

    /// Clear the identifier
    pub fn mark_gone(&mut self) {
        self.id = None;
    }

    /// React to the remote object being absent during a read.
    ///
    /// A freshly created resource must exist, anything else is dropped from state.
    pub fn handle_missing(&mut self, kind: ResourceKind, id: &str) -> Result<()> {
        if self.is_new {
            return Err(ResourceError::NotFoundAfterCreate {
                kind,
                id: id.to_string(),
            }
            .into());
        }
        warn!(
            kind = %kind,
            id = %id,
            "Route53 Recovery Control Config {} ({id}) not found, removing from state",
            kind.display_name()
        );
        self.mark_gone();
        Ok(())
    }
}

/// Attributes of a control panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPanelAttributes {
    pub control_panel_arn: Option<String>,
    pub cluster_arn: String,
    pub name: String,
    pub default_control_panel: bool,
    pub routing_control_count: i32,
    pub status: Option<ResourceStatus>,
}

impl From<ControlPanelDescription> for ControlPanelAttributes {
    fn from(panel: ControlPanelDescription) -> Self {
        Self {
            control_panel_arn: panel.control_panel_arn,
            cluster_arn: panel.cluster_arn.unwrap_or_default(),
            name: panel.name.unwrap_or_default(),
            default_control_panel: panel.default_control_panel,
            routing_control_count: panel.routing_control_count,
            status: panel.status,
        }
    }
}

/// Attributes of a routing control
///
/// `cluster_arn` is only ever known locally; the service does not report it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingControlAttributes {
    pub routing_control_arn: Option<String>,
    pub cluster_arn: String,
    pub control_panel_arn: Option<String>,
    pub name: String,
    pub status: Option<ResourceStatus>,
}

impl RoutingControlAttributes {
    /// Replace everything the service reports, keeping the local cluster ARN
    pub fn refresh(&mut self, control: RoutingControlDescription) {
        self.routing_control_arn = control.routing_control_arn;
        self.control_panel_arn = control.control_panel_arn;
        self.name = control.name.unwrap_or_default();
        self.status = control.status;
    }
}

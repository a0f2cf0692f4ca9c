//! Routing control resource
//!
//! Routing controls live in a control panel of a cluster. When no panel is
//! given the service places the control in the cluster's default panel. The
//! service never reports the cluster ARN back, so it is carried in state.

use super::error::ResourceError;
use super::state::{ResourceState, RoutingControlAttributes};
use super::{RemoteResource, client_token, failure, waiter};
use crate::aws::{
    CreateRoutingControlRequest, RecoveryControlApi, ignore_not_found, is_not_found,
};
use crate::wait::WaitConfig;
use anyhow::{Context, Result};
use garde::Validate;
use recovery_control_common::ResourceKind;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// User-supplied routing control configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RoutingControlConfig {
    #[garde(prefix("arn:"))]
    pub cluster_arn: String,

    /// Panel to place the control in; the cluster default when unset
    #[serde(default)]
    #[garde(prefix("arn:"))]
    pub control_panel_arn: Option<String>,

    #[garde(length(min = 1, max = 64))]
    pub name: String,
}

impl RoutingControlConfig {
    pub fn new(cluster_arn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cluster_arn: cluster_arn.into(),
            control_panel_arn: None,
            name: name.into(),
        }
    }

    pub fn in_panel(mut self, control_panel_arn: impl Into<String>) -> Self {
        self.control_panel_arn = Some(control_panel_arn.into());
        self
    }

    fn check(&self) -> Result<(), ResourceError> {
        self.validate()
            .map_err(|report| ResourceError::InvalidConfig {
                kind: ResourceKind::RoutingControl,
                report,
            })
    }
}

/// Lifecycle handler for routing controls
pub struct RoutingControlResource<A> {
    api: A,
    wait: WaitConfig,
    cancel: Option<CancellationToken>,
}

impl<A: RecoveryControlApi> RoutingControlResource<A> {
    pub fn new(api: A, wait: WaitConfig) -> Self {
        Self {
            api,
            wait,
            cancel: None,
        }
    }

    /// Abort pending waits when the token fires
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn arn(state: &ResourceState<RoutingControlAttributes>) -> Result<String> {
        let id = state.require_id(Self::KIND)?;
        Ok(state
            .attributes
            .routing_control_arn
            .clone()
            .unwrap_or_else(|| id.to_string()))
    }

    /// Reject changes to attributes that are fixed at creation
    fn check_immutable(
        attributes: &RoutingControlAttributes,
        config: &RoutingControlConfig,
    ) -> Result<(), ResourceError> {
        if !attributes.cluster_arn.is_empty() && attributes.cluster_arn != config.cluster_arn {
            return Err(ResourceError::RequiresReplacement {
                kind: Self::KIND,
                field: "cluster_arn",
            });
        }
        match (&attributes.control_panel_arn, &config.control_panel_arn) {
            (Some(current), Some(wanted)) if current != wanted => {
                Err(ResourceError::RequiresReplacement {
                    kind: Self::KIND,
                    field: "control_panel_arn",
                })
            }
            _ => Ok(()),
        }
    }
}

impl<A: RecoveryControlApi> RemoteResource for RoutingControlResource<A> {
    type Config = RoutingControlConfig;
    type Attributes = RoutingControlAttributes;

    const KIND: ResourceKind = ResourceKind::RoutingControl;

    async fn create(
        &self,
        config: &RoutingControlConfig,
    ) -> Result<ResourceState<Self::Attributes>> {
        config.check()?;

        let request = CreateRoutingControlRequest {
            client_token: client_token(),
            cluster_arn: config.cluster_arn.clone(),
            name: config.name.clone(),
            control_panel_arn: config.control_panel_arn.clone(),
        };
        let created = self
            .api
            .create_routing_control(request)
            .await
            .context(failure(Self::KIND, "creating"))?
            .ok_or(ResourceError::EmptyResponse { kind: Self::KIND })?;
        let arn = created
            .routing_control_arn
            .clone()
            .ok_or(ResourceError::EmptyResponse { kind: Self::KIND })?;

        info!(arn = %arn, name = %config.name, "Routing control created, waiting for deployment");

        let mut attributes = RoutingControlAttributes {
            cluster_arn: config.cluster_arn.clone(),
            ..Default::default()
        };
        attributes.refresh(created);
        let mut state = ResourceState::created(arn.clone(), attributes);

        waiter::routing_control_created(&self.api, &arn, &self.wait, self.cancel.as_ref())
            .await
            .with_context(|| {
                format!(
                    "error waiting for Route53 Recovery Control Config Routing Control ({arn}) to be deployed"
                )
            })?;

        self.read(&mut state).await?;
        state.is_new = false;
        Ok(state)
    }

    async fn read(&self, state: &mut ResourceState<Self::Attributes>) -> Result<()> {
        let arn = Self::arn(state)?;

        let described = match self.api.describe_routing_control(&arn).await {
            Ok(found) => found,
            Err(e) if is_not_found(&e) => None,
            Err(e) => return Err(e.context(failure(Self::KIND, "describing"))),
        };

        let Some(control) = described else {
            return state.handle_missing(Self::KIND, &arn);
        };

        debug!(arn = %arn, status = ?control.status, "Read routing control");
        state.attributes.refresh(control);
        Ok(())
    }

    async fn update(
        &self,
        state: &mut ResourceState<Self::Attributes>,
        config: &RoutingControlConfig,
    ) -> Result<()> {
        config.check()?;
        let arn = Self::arn(state)?;
        Self::check_immutable(&state.attributes, config)?;

        if state.attributes.name == config.name {
            debug!(arn = %arn, "Routing control name unchanged");
        } else {
            self.api
                .update_routing_control(&arn, &config.name)
                .await
                .context(failure(Self::KIND, "updating"))?;
        }

        if state.attributes.cluster_arn.is_empty() {
            state.attributes.cluster_arn = config.cluster_arn.clone();
        }

        self.read(state).await
    }

    async fn delete(&self, state: &mut ResourceState<Self::Attributes>) -> Result<()> {
        let arn = Self::arn(state)?;

        let deleted = ignore_not_found(self.api.delete_routing_control(&arn).await)
            .context(failure(Self::KIND, "deleting"))?;
        if deleted.is_none() {
            info!(arn = %arn, "Routing control already deleted");
            state.mark_gone();
            return Ok(());
        }

        match waiter::routing_control_deleted(&self.api, &arn, &self.wait, self.cancel.as_ref())
            .await
        {
            Ok(()) => {}
            Err(e) if is_not_found(&e) => {}
            Err(e) => {
                return Err(e.context(format!(
                    "error waiting for Route53 Recovery Control Config Routing Control ({arn}) to be deleted"
                )));
            }
        }

        info!(arn = %arn, "Routing control deleted");
        state.mark_gone();
        Ok(())
    }
}

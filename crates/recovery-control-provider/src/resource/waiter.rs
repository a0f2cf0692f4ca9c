//! Status waiters for control panels and routing controls
//!
//! Creation polls until the resource reports `DEPLOYED`, deletion until it is
//! no longer found. Any status outside the expected transition ends the
//! wait with [`ResourceError::UnexpectedStatus`].

use super::error::ResourceError;
use crate::aws::{RecoveryControlApi, is_not_found};
use crate::wait::{WaitConfig, wait_for_resource};
use anyhow::Result;
use recovery_control_common::{ResourceKind, ResourceStatus};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What a single describe call saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Observed {
    Missing,
    Present(Option<ResourceStatus>),
}

/// Terminal condition of a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Deployed,
    Deleted,
}

impl Target {
    fn expected(self) -> &'static str {
        match self {
            Target::Deployed => "DEPLOYED",
            Target::Deleted => "deletion",
        }
    }

    fn is_reached(self, kind: ResourceKind, id: &str, observed: Observed) -> Result<bool> {
        match (self, observed) {
            (Target::Deployed, Observed::Present(Some(ResourceStatus::Deployed))) => Ok(true),
            (Target::Deployed, Observed::Present(Some(ResourceStatus::Pending) | None)) => {
                Ok(false)
            }
            (Target::Deployed, Observed::Missing) => {
                debug!(kind = %kind, id = %id, "Resource not visible yet");
                Ok(false)
            }
            (Target::Deleted, Observed::Missing) => Ok(true),
            (Target::Deleted, Observed::Present(Some(ResourceStatus::PendingDeletion) | None)) => {
                Ok(false)
            }
            (target, Observed::Present(Some(status))) => Err(ResourceError::UnexpectedStatus {
                kind,
                id: id.to_string(),
                status,
                expected: target.expected(),
            }
            .into()),
        }
    }
}

/// Turn a describe result into an observation; "not found" is an answer, not a failure
fn observe<T>(result: Result<Option<T>>, status: impl FnOnce(&T) -> Option<ResourceStatus>) -> Result<Observed> {
    match result {
        Ok(Some(found)) => Ok(Observed::Present(status(&found))),
        Ok(None) => Ok(Observed::Missing),
        Err(e) if is_not_found(&e) => Ok(Observed::Missing),
        Err(e) => Err(e),
    }
}

async fn wait_for_target<F, Fut>(
    kind: ResourceKind,
    id: &str,
    target: Target,
    config: &WaitConfig,
    cancel: Option<&CancellationToken>,
    describe: F,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Observed>>,
{
    let resource_name = format!("{} {id}", kind.display_name());
    wait_for_resource(
        config,
        cancel,
        || async { target.is_reached(kind, id, describe().await?) },
        &resource_name,
    )
    .await
}

/// Wait until a control panel reports `DEPLOYED`
pub async fn control_panel_created<A: RecoveryControlApi>(
    api: &A,
    arn: &str,
    config: &WaitConfig,
    cancel: Option<&CancellationToken>,
) -> Result<()> {
    wait_for_target(
        ResourceKind::ControlPanel,
        arn,
        Target::Deployed,
        config,
        cancel,
        || async { observe(api.describe_control_panel(arn).await, |p| p.status) },
    )
    .await
}

/// Wait until a control panel can no longer be found
pub async fn control_panel_deleted<A: RecoveryControlApi>(
    api: &A,
    arn: &str,
    config: &WaitConfig,
    cancel: Option<&CancellationToken>,
) -> Result<()> {
    wait_for_target(
        ResourceKind::ControlPanel,
        arn,
        Target::Deleted,
        config,
        cancel,
        || async { observe(api.describe_control_panel(arn).await, |p| p.status) },
    )
    .await
}

/// Wait until a routing control reports `DEPLOYED`
pub async fn routing_control_created<A: RecoveryControlApi>(
    api: &A,
    arn: &str,
    config: &WaitConfig,
    cancel: Option<&CancellationToken>,
) -> Result<()> {
    wait_for_target(
        ResourceKind::RoutingControl,
        arn,
        Target::Deployed,
        config,
        cancel,
        || async { observe(api.describe_routing_control(arn).await, |c| c.status) },
    )
    .await
}

/// Wait until a routing control can no longer be found
pub async fn routing_control_deleted<A: RecoveryControlApi>(
    api: &A,
    arn: &str,
    config: &WaitConfig,
    cancel: Option<&CancellationToken>,
) -> Result<()> {
    wait_for_target(
        ResourceKind::RoutingControl,
        arn,
        Target::Deleted,
        config,
        cancel,
        || async { observe(api.describe_routing_control(arn).await, |c| c.status) },
    )
    .await
}

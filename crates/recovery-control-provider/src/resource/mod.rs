//! Lifecycle handlers for Recovery Control Config resources
//!
//! Each handler implements [`RemoteResource`]: create, read, update, delete
//! and import against a [`RecoveryControlApi`](crate::aws::RecoveryControlApi),
//! blocking on the status waiters where the service applies changes
//! asynchronously.

pub mod control_panel;
pub mod error;
pub mod routing_control;
pub mod state;
pub mod waiter;

pub use control_panel::{ControlPanelConfig, ControlPanelResource};
pub use error::ResourceError;
pub use routing_control::{RoutingControlConfig, RoutingControlResource};
pub use state::{ControlPanelAttributes, ResourceState, RoutingControlAttributes};

use anyhow::Result;
use recovery_control_common::{ResourceKind, ResourceSchema, schema::schema_for};
use uuid::Uuid;

/// Lifecycle contract shared by all managed resource types.
///
/// `read` updates the state in place. When the remote object is gone (and
/// the state was not produced by a create in the same run) the identifier is
/// cleared and `Ok(())` returned, so the caller can drop it from state.
#[allow(async_fn_in_trait)] // Handlers are driven from a single task
pub trait RemoteResource {
    /// Desired configuration supplied by the user
    type Config;
    /// Attributes recorded in state
    type Attributes: Default;

    const KIND: ResourceKind;

    /// Attribute schema for this resource type
    fn schema() -> ResourceSchema {
        schema_for(Self::KIND)
    }

    async fn create(&self, config: &Self::Config) -> Result<ResourceState<Self::Attributes>>;

    async fn read(&self, state: &mut ResourceState<Self::Attributes>) -> Result<()>;

    async fn update(
        &self,
        state: &mut ResourceState<Self::Attributes>,
        config: &Self::Config,
    ) -> Result<()>;

    async fn delete(&self, state: &mut ResourceState<Self::Attributes>) -> Result<()>;

    /// Adopt an existing resource by ARN and populate its state from the service
    async fn import(&self, id: &str) -> Result<ResourceState<Self::Attributes>> {
        let mut state = ResourceState::from_id(id);
        self.read(&mut state).await?;
        if state.is_gone() {
            return Err(ResourceError::ImportNotFound {
                kind: Self::KIND,
                id: id.to_string(),
            }
            .into());
        }
        Ok(state)
    }
}

/// A single lifecycle request against one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<C> {
    Create(C),
    /// Refresh an existing resource by ARN
    Read(String),
    /// Refresh by ARN, then converge on the given configuration
    Update(String, C),
    Delete(String),
    Import(String),
}

/// Run one operation and return the resulting state.
///
/// Deleted or vanished resources come back with `id` cleared.
pub async fn apply<R: RemoteResource>(
    resource: &R,
    operation: Operation<R::Config>,
) -> Result<ResourceState<R::Attributes>> {
    match operation {
        Operation::Create(config) => resource.create(&config).await,
        Operation::Read(arn) => {
            let mut state = ResourceState::from_id(arn);
            resource.read(&mut state).await?;
            Ok(state)
        }
        Operation::Update(arn, config) => {
            let mut state = resource.import(&arn).await?;
            resource.update(&mut state, &config).await?;
            Ok(state)
        }
        Operation::Delete(arn) => {
            let mut state = ResourceState::from_id(arn);
            resource.delete(&mut state).await?;
            Ok(state)
        }
        Operation::Import(arn) => resource.import(&arn).await,
    }
}

/// Fresh idempotency token for a create call
pub(crate) fn client_token() -> String {
    Uuid::now_v7().to_string()
}

/// Error context for a failed API call, e.g. "error creating Route53 Recovery Control Config Control Panel"
pub(crate) fn failure(kind: ResourceKind, action: &str) -> String {
    format!(
        "error {action} Route53 Recovery Control Config {}",
        kind.display_name()
    )
}

//! Control panel resource
//!
//! A control panel groups routing controls inside a cluster. It is created
//! in `PENDING` state and becomes usable once the service reports `DEPLOYED`.
//! Only the name can change in place.

use super::error::ResourceError;
use super::state::{ControlPanelAttributes, ResourceState};
use super::{RemoteResource, client_token, failure, waiter};
use crate::aws::{CreateControlPanelRequest, RecoveryControlApi, ignore_not_found, is_not_found};
use crate::wait::WaitConfig;
use anyhow::{Context, Result};
use garde::Validate;
use recovery_control_common::ResourceKind;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// User-supplied control panel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ControlPanelConfig {
    /// Cluster that hosts the panel; fixed at creation
    #[garde(prefix("arn:"))]
    pub cluster_arn: String,

    #[garde(length(min = 1, max = 64))]
    pub name: String,
}

impl ControlPanelConfig {
    pub fn new(cluster_arn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cluster_arn: cluster_arn.into(),
            name: name.into(),
        }
    }

    fn check(&self) -> Result<(), ResourceError> {
        self.validate()
            .map_err(|report| ResourceError::InvalidConfig {
                kind: ResourceKind::ControlPanel,
                report,
            })
    }
}

/// Lifecycle handler for control panels
pub struct ControlPanelResource<A> {
    api: A,
    wait: WaitConfig,
    cancel: Option<CancellationToken>,
}

impl<A: RecoveryControlApi> ControlPanelResource<A> {
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

    /// Remote ARN, preferring the recorded attribute over the state id
    fn arn(state: &ResourceState<ControlPanelAttributes>) -> Result<String> {
        let id = state.require_id(Self::KIND)?;
        Ok(state
            .attributes
            .control_panel_arn
            .clone()
            .unwrap_or_else(|| id.to_string()))
    }
}

impl<A: RecoveryControlApi> RemoteResource for ControlPanelResource<A> {
    type Config = ControlPanelConfig;
    type Attributes = ControlPanelAttributes;

    const KIND: ResourceKind = ResourceKind::ControlPanel;

    async fn create(&self, config: &ControlPanelConfig) -> Result<ResourceState<Self::Attributes>> {
        config.check()?;

        let request = CreateControlPanelRequest {
            client_token: client_token(),
            cluster_arn: config.cluster_arn.clone(),
            name: config.name.clone(),
        };
        let created = self
            .api
            .create_control_panel(request)
            .await
            .context(failure(Self::KIND, "creating"))?
            .ok_or(ResourceError::EmptyResponse { kind: Self::KIND })?;
        let arn = created
            .control_panel_arn
            .clone()
            .ok_or(ResourceError::EmptyResponse { kind: Self::KIND })?;

        info!(arn = %arn, name = %config.name, "Control panel created, waiting for deployment");

        let mut state = ResourceState::created(
            arn.clone(),
            ControlPanelAttributes {
                control_panel_arn: Some(arn.clone()),
                cluster_arn: config.cluster_arn.clone(),
                name: config.name.clone(),
                ..created.into()
            },
        );

        waiter::control_panel_created(&self.api, &arn, &self.wait, self.cancel.as_ref())
            .await
            .with_context(|| {
                format!(
                    "error waiting for Route53 Recovery Control Config Control Panel ({arn}) to be deployed"
                )
            })?;

        self.read(&mut state).await?;
        state.is_new = false;
        Ok(state)
    }

    async fn read(&self, state: &mut ResourceState<Self::Attributes>) -> Result<()> {
        let arn = Self::arn(state)?;

        let described = match self.api.describe_control_panel(&arn).await {
            Ok(found) => found,
            Err(e) if is_not_found(&e) => None,
            Err(e) => return Err(e.context(failure(Self::KIND, "describing"))),
        };

        let Some(panel) = described else {
            return state.handle_missing(Self::KIND, &arn);
        };

        debug!(arn = %arn, status = ?panel.status, "Read control panel");
        state.attributes = panel.into();
        Ok(())
    }

    async fn update(
        &self,
        state: &mut ResourceState<Self::Attributes>,
        config: &ControlPanelConfig,
    ) -> Result<()> {
        config.check()?;
        let arn = Self::arn(state)?;

        if !state.attributes.cluster_arn.is_empty()
            && state.attributes.cluster_arn != config.cluster_arn
        {
            return Err(ResourceError::RequiresReplacement {
                kind: Self::KIND,
                field: "cluster_arn",
            }
            .into());
        }

        if state.attributes.name == config.name {
            debug!(arn = %arn, "Control panel name unchanged");
        } else {
            self.api
                .update_control_panel(&arn, &config.name)
                .await
                .context(failure(Self::KIND, "updating"))?;
        }

        self.read(state).await
    }

    async fn delete(&self, state: &mut ResourceState<Self::Attributes>) -> Result<()> {
        let arn = Self::arn(state)?;

        let deleted = ignore_not_found(self.api.delete_control_panel(&arn).await)
            .context(failure(Self::KIND, "deleting"))?;
        if deleted.is_none() {
            info!(arn = %arn, "Control panel already deleted");
            state.mark_gone();
            return Ok(());
        }

        match waiter::control_panel_deleted(&self.api, &arn, &self.wait, self.cancel.as_ref())
            .await
        {
            Ok(()) => {}
            Err(e) if is_not_found(&e) => {}
            Err(e) => {
                return Err(e.context(format!(
                    "error waiting for Route53 Recovery Control Config Control Panel ({arn}) to be deleted"
                )));
            }
        }

        info!(arn = %arn, "Control panel deleted");
        state.mark_gone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::{AwsError, ControlPanelDescription, MockRecoveryControlApi};
    use crate::resource::test_support::{CLUSTER_ARN, PANEL_ARN, fast_wait, not_found};
    use crate::wait::WaitError;
    use mockall::Sequence;
    use recovery_control_common::ResourceStatus;
    use recovery_control_common::defaults::NAME_MAX_LEN;

    fn panel(name: &str, status: ResourceStatus) -> ControlPanelDescription {
        ControlPanelDescription {
            control_panel_arn: Some(PANEL_ARN.to_string()),
            cluster_arn: Some(CLUSTER_ARN.to_string()),
            name: Some(name.to_string()),
            default_control_panel: false,
            routing_control_count: 0,
            status: Some(status),
        }
    }

    fn existing(name: &str) -> ResourceState<ControlPanelAttributes> {
        ResourceState {
            id: Some(PANEL_ARN.to_string()),
            is_new: false,
            attributes: panel(name, ResourceStatus::Deployed).into(),
        }
    }

    #[tokio::test]
    async fn create_waits_for_deployment_then_reads() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_create_control_panel()
            .withf(|req| {
                req.cluster_arn == CLUSTER_ARN && req.name == "panel-a" && !req.client_token.is_empty()
            })
            .times(1)
            .returning(|_| Ok(Some(panel("panel-a", ResourceStatus::Pending))));

        let mut seq = Sequence::new();
        api.expect_describe_control_panel()
            .withf(|arn| arn == PANEL_ARN)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(panel("panel-a", ResourceStatus::Pending))));
        api.expect_describe_control_panel()
            .withf(|arn| arn == PANEL_ARN)
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(panel("panel-a", ResourceStatus::Deployed))));

        let resource = ControlPanelResource::new(api, fast_wait());
        let state = resource
            .create(&ControlPanelConfig::new(CLUSTER_ARN, "panel-a"))
            .await
            .unwrap();

        assert_eq!(state.id.as_deref(), Some(PANEL_ARN));
        assert!(!state.is_new);
        assert_eq!(state.attributes.name, "panel-a");
        assert_eq!(state.attributes.cluster_arn, CLUSTER_ARN);
        assert_eq!(state.attributes.status, Some(ResourceStatus::Deployed));
    }

    #[tokio::test]
    async fn create_uses_fresh_client_tokens() {
        use std::sync::{Arc, Mutex};

        let tokens = Arc::new(Mutex::new(Vec::new()));
        let seen = tokens.clone();
        let mut api = MockRecoveryControlApi::new();
        api.expect_create_control_panel()
            .times(2)
            .returning(move |req| {
                seen.lock().unwrap().push(req.client_token);
                Ok(Some(panel("panel-a", ResourceStatus::Deployed)))
            });
        api.expect_describe_control_panel()
            .returning(|_| Ok(Some(panel("panel-a", ResourceStatus::Deployed))));

        let resource = ControlPanelResource::new(api, fast_wait());
        let config = ControlPanelConfig::new(CLUSTER_ARN, "panel-a");
        resource.create(&config).await.unwrap();
        resource.create(&config).await.unwrap();

        let tokens = tokens.lock().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_ne!(tokens[0], tokens[1]);
    }

    #[tokio::test]
    async fn create_with_empty_response_fails_before_waiting() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_create_control_panel()
            .times(1)
            .returning(|_| Ok(None));
        api.expect_describe_control_panel().never();

        let resource = ControlPanelResource::new(api, fast_wait());
        let err = resource
            .create(&ControlPanelConfig::new(CLUSTER_ARN, "panel-a"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResourceError>(),
            Some(ResourceError::EmptyResponse { .. })
        ));
    }

    #[tokio::test]
    async fn create_rejects_invalid_config_without_calling_service() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_create_control_panel().never();

        let resource = ControlPanelResource::new(api, fast_wait());
        for config in [
            ControlPanelConfig::new(CLUSTER_ARN, ""),
            ControlPanelConfig::new("cluster-1", "panel-a"),
            ControlPanelConfig::new(CLUSTER_ARN, "x".repeat(NAME_MAX_LEN + 1)),
        ] {
            let err = resource.create(&config).await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<ResourceError>(),
                Some(ResourceError::InvalidConfig { .. })
            ));
        }
    }

    #[tokio::test]
    async fn create_surfaces_service_errors() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_create_control_panel().times(1).returning(|_| {
            Err(AwsError::Validation {
                message: "cluster does not exist".to_string(),
            }
            .into())
        });

        let resource = ControlPanelResource::new(api, fast_wait());
        let err = resource
            .create(&ControlPanelConfig::new(CLUSTER_ARN, "panel-a"))
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .starts_with("error creating Route53 Recovery Control Config Control Panel")
        );
        assert!(matches!(
            crate::aws::find_aws_error(&err),
            Some(AwsError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn create_reports_waiter_timeout_with_arn() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_create_control_panel()
            .returning(|_| Ok(Some(panel("panel-a", ResourceStatus::Pending))));
        api.expect_describe_control_panel()
            .returning(|_| Ok(Some(panel("panel-a", ResourceStatus::Pending))));

        let wait = WaitConfig {
            timeout: std::time::Duration::from_millis(20),
            ..fast_wait()
        };
        let resource = ControlPanelResource::new(api, wait);
        let err = resource
            .create(&ControlPanelConfig::new(CLUSTER_ARN, "panel-a"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains(PANEL_ARN));
        assert!(err.to_string().contains("to be deployed"));
        assert!(err.downcast_ref::<WaitError>().is_some());
    }

    #[tokio::test]
    async fn read_replaces_attributes() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_describe_control_panel().times(1).returning(|_| {
            Ok(Some(ControlPanelDescription {
                routing_control_count: 3,
                ..panel("renamed-elsewhere", ResourceStatus::Deployed)
            }))
        });

        let resource = ControlPanelResource::new(api, fast_wait());
        let mut state = existing("panel-a");
        resource.read(&mut state).await.unwrap();

        assert_eq!(state.attributes.name, "renamed-elsewhere");
        assert_eq!(state.attributes.routing_control_count, 3);
        assert_eq!(state.id.as_deref(), Some(PANEL_ARN));
    }

    #[tokio::test]
    async fn read_of_vanished_panel_clears_state() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_describe_control_panel()
            .times(1)
            .returning(|_| Err(not_found()));

        let resource = ControlPanelResource::new(api, fast_wait());
        let mut state = existing("panel-a");
        resource.read(&mut state).await.unwrap();
        assert!(state.is_gone());
    }

    #[tokio::test]
    async fn read_of_new_panel_that_vanished_is_an_error() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_describe_control_panel()
            .times(1)
            .returning(|_| Ok(None));

        let resource = ControlPanelResource::new(api, fast_wait());
        let mut state = ResourceState::created(PANEL_ARN, ControlPanelAttributes::default());
        let err = resource.read(&mut state).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResourceError>(),
            Some(ResourceError::NotFoundAfterCreate { .. })
        ));
    }

    #[tokio::test]
    async fn read_propagates_other_errors() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_describe_control_panel()
            .times(1)
            .returning(|_| Err(AwsError::Throttled.into()));

        let resource = ControlPanelResource::new(api, fast_wait());
        let mut state = existing("panel-a");
        let err = resource.read(&mut state).await.unwrap_err();
        assert!(
            err.to_string()
                .starts_with("error describing Route53 Recovery Control Config Control Panel")
        );
        assert_eq!(state.id.as_deref(), Some(PANEL_ARN));
    }

    #[tokio::test]
    async fn update_renames_then_reads() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_update_control_panel()
            .withf(|arn, name| arn == PANEL_ARN && name == "panel-b")
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_describe_control_panel()
            .times(1)
            .returning(|_| Ok(Some(panel("panel-b", ResourceStatus::Deployed))));

        let resource = ControlPanelResource::new(api, fast_wait());
        let mut state = existing("panel-a");
        resource
            .update(&mut state, &ControlPanelConfig::new(CLUSTER_ARN, "panel-b"))
            .await
            .unwrap();

        assert_eq!(state.attributes.name, "panel-b");
        assert_eq!(state.attributes.cluster_arn, CLUSTER_ARN);
        assert_eq!(state.attributes.control_panel_arn.as_deref(), Some(PANEL_ARN));
    }

    #[tokio::test]
    async fn update_without_rename_only_reads() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_update_control_panel().never();
        api.expect_describe_control_panel()
            .times(1)
            .returning(|_| Ok(Some(panel("panel-a", ResourceStatus::Deployed))));

        let resource = ControlPanelResource::new(api, fast_wait());
        let mut state = existing("panel-a");
        resource
            .update(&mut state, &ControlPanelConfig::new(CLUSTER_ARN, "panel-a"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_refuses_cluster_change() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_update_control_panel().never();
        api.expect_describe_control_panel().never();

        let resource = ControlPanelResource::new(api, fast_wait());
        let mut state = existing("panel-a");
        let err = resource
            .update(
                &mut state,
                &ControlPanelConfig::new("arn:aws:cluster/2", "panel-b"),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResourceError>(),
            Some(ResourceError::RequiresReplacement {
                field: "cluster_arn",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn update_failure_is_reported() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_update_control_panel().times(1).returning(|_, _| {
            Err(AwsError::Conflict {
                message: "cluster busy".to_string(),
            }
            .into())
        });

        let resource = ControlPanelResource::new(api, fast_wait());
        let mut state = existing("panel-a");
        let err = resource
            .update(&mut state, &ControlPanelConfig::new(CLUSTER_ARN, "panel-b"))
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .starts_with("error updating Route53 Recovery Control Config Control Panel")
        );
        assert_eq!(state.attributes.name, "panel-a");
    }

    #[tokio::test]
    async fn delete_waits_until_gone() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_delete_control_panel()
            .withf(|arn| arn == PANEL_ARN)
            .times(1)
            .returning(|_| Ok(()));

        let mut seq = Sequence::new();
        api.expect_describe_control_panel()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(panel("panel-a", ResourceStatus::PendingDeletion))));
        api.expect_describe_control_panel()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(not_found()));

        let resource = ControlPanelResource::new(api, fast_wait());
        let mut state = existing("panel-a");
        resource.delete(&mut state).await.unwrap();
        assert!(state.is_gone());
    }

    #[tokio::test]
    async fn delete_of_missing_panel_succeeds_without_waiting() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_delete_control_panel()
            .times(1)
            .returning(|_| Err(not_found()));
        api.expect_describe_control_panel().never();

        let resource = ControlPanelResource::new(api, fast_wait());
        let mut state = existing("panel-a");
        resource.delete(&mut state).await.unwrap();
        assert!(state.is_gone());
    }

    #[tokio::test]
    async fn delete_surfaces_other_errors() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_delete_control_panel().times(1).returning(|_| {
            Err(AwsError::Conflict {
                message: "panel still has routing controls".to_string(),
            }
            .into())
        });

        let resource = ControlPanelResource::new(api, fast_wait());
        let mut state = existing("panel-a");
        let err = resource.delete(&mut state).await.unwrap_err();
        assert!(
            err.to_string()
                .starts_with("error deleting Route53 Recovery Control Config Control Panel")
        );
        assert!(!state.is_gone());
    }

    #[tokio::test]
    async fn import_reads_existing_panel() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_describe_control_panel()
            .times(1)
            .returning(|_| Ok(Some(panel("panel-a", ResourceStatus::Deployed))));

        let resource = ControlPanelResource::new(api, fast_wait());
        let state = resource.import(PANEL_ARN).await.unwrap();
        assert_eq!(state.attributes.cluster_arn, CLUSTER_ARN);
        assert_eq!(state.attributes.name, "panel-a");
    }

    #[tokio::test]
    async fn import_of_missing_panel_fails() {
        let mut api = MockRecoveryControlApi::new();
        api.expect_describe_control_panel()
            .times(1)
            .returning(|_| Err(not_found()));

        let resource = ControlPanelResource::new(api, fast_wait());
        let err = resource.import(PANEL_ARN).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResourceError>(),
            Some(ResourceError::ImportNotFound { .. })
        ));
    }

    #[test]
    fn schema_matches_attributes() {
        let schema = ControlPanelResource::<MockRecoveryControlApi>::schema();
        assert_eq!(schema.configurable(), vec!["cluster_arn", "name"]);
    }
}

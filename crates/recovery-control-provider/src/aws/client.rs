//! Recovery Control Config client backed by the AWS SDK

use super::context::{AwsContext, FromAwsContext};
use super::error::classify_sdk_error;
use super::operations::RecoveryControlApi;
use super::types::{
    ControlPanelDescription, CreateControlPanelRequest, CreateRoutingControlRequest,
    RoutingControlDescription,
};
use anyhow::Result;
use aws_sdk_route53recoverycontrolconfig::Client;
use aws_sdk_route53recoverycontrolconfig::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_route53recoverycontrolconfig::types::{ControlPanel, RoutingControl, Status};
use recovery_control_common::ResourceStatus;
use tracing::{debug, info};

/// Client for control panel and routing control operations
#[derive(Clone)]
pub struct RecoveryControlClient {
    client: Client,
}

impl RecoveryControlClient {
    /// Create a new client (loads AWS config from environment)
    pub async fn new(region: &str) -> Self {
        let ctx = AwsContext::new(region).await;
        Self::from_context(&ctx)
    }
}

impl FromAwsContext for RecoveryControlClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.recovery_control_client(),
        }
    }
}

/// Wrap an SDK failure with its classification and the failing operation
fn sdk_failure<E, R>(operation: &'static str, error: SdkError<E, R>) -> anyhow::Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let classified = classify_sdk_error(&error);
    debug!(operation, error = %classified, "Recovery Control Config call failed");
    anyhow::Error::new(classified).context(format!("{operation} failed"))
}

fn convert_status(status: Option<&Status>) -> Option<ResourceStatus> {
    status.and_then(|s| ResourceStatus::parse(s.as_str()))
}

impl From<&ControlPanel> for ControlPanelDescription {
    fn from(panel: &ControlPanel) -> Self {
        Self {
            control_panel_arn: panel.control_panel_arn().map(str::to_string),
            cluster_arn: panel.cluster_arn().map(str::to_string),
            name: panel.name().map(str::to_string),
            default_control_panel: panel.default_control_panel().unwrap_or_default(),
            routing_control_count: panel.routing_control_count().unwrap_or_default(),
            status: convert_status(panel.status()),
        }
    }
}

impl From<&RoutingControl> for RoutingControlDescription {
    fn from(control: &RoutingControl) -> Self {
        Self {
            routing_control_arn: control.routing_control_arn().map(str::to_string),
            control_panel_arn: control.control_panel_arn().map(str::to_string),
            name: control.name().map(str::to_string),
            status: convert_status(control.status()),
        }
    }
}

impl RecoveryControlApi for RecoveryControlClient {
    async fn create_control_panel(
        &self,
        request: CreateControlPanelRequest,
    ) -> Result<Option<ControlPanelDescription>> {
        info!(
            cluster_arn = %request.cluster_arn,
            name = %request.name,
            "Creating control panel"
        );

        let response = self
            .client
            .create_control_panel()
            .client_token(request.client_token)
            .cluster_arn(request.cluster_arn)
            .control_panel_name(request.name)
            .send()
            .await
            .map_err(|e| sdk_failure("CreateControlPanel", e))?;

        Ok(response.control_panel().map(ControlPanelDescription::from))
    }

    async fn describe_control_panel(&self, arn: &str) -> Result<Option<ControlPanelDescription>> {
        debug!(arn = %arn, "Describing control panel");

        let response = self
            .client
            .describe_control_panel()
            .control_panel_arn(arn)
            .send()
            .await
            .map_err(|e| sdk_failure("DescribeControlPanel", e))?;

        Ok(response.control_panel().map(ControlPanelDescription::from))
    }

    async fn update_control_panel(&self, arn: &str, name: &str) -> Result<()> {
        info!(arn = %arn, name = %name, "Renaming control panel");

        self.client
            .update_control_panel()
            .control_panel_arn(arn)
            .control_panel_name(name)
            .send()
            .await
            .map_err(|e| sdk_failure("UpdateControlPanel", e))?;

        Ok(())
    }

    async fn delete_control_panel(&self, arn: &str) -> Result<()> {
        info!(arn = %arn, "Deleting control panel");

        self.client
            .delete_control_panel()
            .control_panel_arn(arn)
            .send()
            .await
            .map_err(|e| sdk_failure("DeleteControlPanel", e))?;

        Ok(())
    }

    async fn create_routing_control(
        &self,
        request: CreateRoutingControlRequest,
    ) -> Result<Option<RoutingControlDescription>> {
        info!(
            cluster_arn = %request.cluster_arn,
            control_panel_arn = ?request.control_panel_arn,
            name = %request.name,
            "Creating routing control"
        );

        let response = self
            .client
            .create_routing_control()
            .client_token(request.client_token)
            .cluster_arn(request.cluster_arn)
            .routing_control_name(request.name)
            .set_control_panel_arn(request.control_panel_arn)
            .send()
            .await
            .map_err(|e| sdk_failure("CreateRoutingControl", e))?;

        Ok(response.routing_control().map(RoutingControlDescription::from))
    }

    async fn describe_routing_control(
        &self,
        arn: &str,
    ) -> Result<Option<RoutingControlDescription>> {
        debug!(arn = %arn, "Describing routing control");

        let response = self
            .client
            .describe_routing_control()
            .routing_control_arn(arn)
            .send()
            .await
            .map_err(|e| sdk_failure("DescribeRoutingControl", e))?;

        Ok(response.routing_control().map(RoutingControlDescription::from))
    }

    async fn update_routing_control(&self, arn: &str, name: &str) -> Result<()> {
        info!(arn = %arn, name = %name, "Renaming routing control");

        self.client
            .update_routing_control()
            .routing_control_arn(arn)
            .routing_control_name(name)
            .send()
            .await
            .map_err(|e| sdk_failure("UpdateRoutingControl", e))?;

        Ok(())
    }

    async fn delete_routing_control(&self, arn: &str) -> Result<()> {
        info!(arn = %arn, "Deleting routing control");

        self.client
            .delete_routing_control()
            .routing_control_arn(arn)
            .send()
            .await
            .map_err(|e| sdk_failure("DeleteRoutingControl", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_panel_conversion() {
        let panel = ControlPanel::builder()
            .control_panel_arn("arn:aws:route53-recovery-control::123456789012:controlpanel/abc")
            .cluster_arn("arn:aws:route53-recovery-control::123456789012:cluster/def")
            .name("panel-a")
            .default_control_panel(false)
            .routing_control_count(3)
            .status(Status::Deployed)
            .build();

        let desc = ControlPanelDescription::from(&panel);
        assert_eq!(desc.name.as_deref(), Some("panel-a"));
        assert_eq!(desc.routing_control_count, 3);
        assert!(!desc.default_control_panel);
        assert_eq!(desc.status, Some(ResourceStatus::Deployed));
    }

    #[test]
    fn test_routing_control_conversion() {
        let control = RoutingControl::builder()
            .routing_control_arn(
                "arn:aws:route53-recovery-control::123456789012:controlpanel/abc/routingcontrol/xyz",
            )
            .name("rc-a")
            .status(Status::PendingDeletion)
            .build();

        let desc = RoutingControlDescription::from(&control);
        assert_eq!(desc.name.as_deref(), Some("rc-a"));
        assert!(desc.control_panel_arn.is_none());
        assert_eq!(desc.status, Some(ResourceStatus::PendingDeletion));
    }

    #[test]
    fn test_unknown_status_is_dropped() {
        let panel = ControlPanel::builder()
            .status(Status::from("SOMETHING_NEW"))
            .build();
        assert_eq!(ControlPanelDescription::from(&panel).status, None);
        assert_eq!(ControlPanelDescription::from(&panel).routing_control_count, 0);
    }
}

//! Attribute schemas for the managed resource kinds
//!
//! Each resource kind declares its attributes with a type and a mutability:
//! `Required` and `Optional` attributes come from user configuration,
//! `Computed` attributes are only ever written from the remote response.

use crate::ResourceKind;
use serde::Serialize;

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttributeType {
    String,
    Bool,
    Int,
}

/// Who owns an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mutability {
    /// Must be set in configuration
    Required,
    /// May be set in configuration
    Optional,
    /// Set by the service, read-only locally
    Computed,
}

/// Schema for a single attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: AttributeType,
    pub mutability: Mutability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl AttributeSchema {
    pub fn required(name: &'static str, ty: AttributeType) -> Self {
        Self::new(name, ty, Mutability::Required)
    }

    pub fn optional(name: &'static str, ty: AttributeType) -> Self {
        Self::new(name, ty, Mutability::Optional)
    }

    pub fn computed(name: &'static str, ty: AttributeType) -> Self {
        Self::new(name, ty, Mutability::Computed)
    }

    fn new(name: &'static str, ty: AttributeType, mutability: Mutability) -> Self {
        Self {
            name,
            ty,
            mutability,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Whether the attribute is user-configurable
    pub fn is_configurable(&self) -> bool {
        !matches!(self.mutability, Mutability::Computed)
    }
}

/// Schema for one resource kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub attributes: Vec<AttributeSchema>,
}

impl ResourceSchema {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            attributes: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: AttributeSchema) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Look up an attribute by name
    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Names of attributes with the given mutability
    pub fn names_with(&self, mutability: Mutability) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.mutability == mutability)
            .map(|a| a.name)
            .collect()
    }

    /// Names of required and optional attributes, in declaration order
    pub fn configurable(&self) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.is_configurable())
            .map(|a| a.name)
            .collect()
    }
}

/// Schema for `aws_route53recoverycontrolconfig_control_panel`
pub fn control_panel_schema() -> ResourceSchema {
    ResourceSchema::new(ResourceKind::ControlPanel.type_name())
        .attribute(
            AttributeSchema::computed("control_panel_arn", AttributeType::String)
                .with_description("ARN of the control panel."),
        )
        .attribute(
            AttributeSchema::required("cluster_arn", AttributeType::String)
                .with_description("ARN of the cluster that hosts the control panel."),
        )
        .attribute(
            AttributeSchema::computed("default_control_panel", AttributeType::Bool)
                .with_description("Whether this is the cluster's default control panel."),
        )
        .attribute(
            AttributeSchema::computed("routing_control_count", AttributeType::Int)
                .with_description("Number of routing controls in the control panel."),
        )
        .attribute(
            AttributeSchema::required("name", AttributeType::String)
                .with_description("Name of the control panel."),
        )
        .attribute(
            AttributeSchema::computed("status", AttributeType::String)
                .with_description("PENDING, DEPLOYED or PENDING_DELETION."),
        )
}

/// Schema for `aws_route53recoverycontrolconfig_routing_control`
pub fn routing_control_schema() -> ResourceSchema {
    ResourceSchema::new(ResourceKind::RoutingControl.type_name())
        .attribute(
            AttributeSchema::computed("routing_control_arn", AttributeType::String)
                .with_description("ARN of the routing control."),
        )
        .attribute(
            AttributeSchema::required("cluster_arn", AttributeType::String)
                .with_description("ARN of the cluster in which the routing control is created."),
        )
        .attribute(
            AttributeSchema::optional("control_panel_arn", AttributeType::String).with_description(
                "ARN of the control panel for the routing control. Uses the cluster's default control panel when unset.",
            ),
        )
        .attribute(
            AttributeSchema::required("name", AttributeType::String)
                .with_description("Name of the routing control."),
        )
        .attribute(
            AttributeSchema::computed("status", AttributeType::String)
                .with_description("PENDING, DEPLOYED or PENDING_DELETION."),
        )
}

/// Schema for the given resource kind
pub fn schema_for(kind: ResourceKind) -> ResourceSchema {
    match kind {
        ResourceKind::ControlPanel => control_panel_schema(),
        ResourceKind::RoutingControl => routing_control_schema(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_panel_mutability() {
        let schema = control_panel_schema();
        assert_eq!(schema.names_with(Mutability::Required), ["cluster_arn", "name"]);
        assert!(schema.names_with(Mutability::Optional).is_empty());
        assert_eq!(
            schema.names_with(Mutability::Computed),
            [
                "control_panel_arn",
                "default_control_panel",
                "routing_control_count",
                "status"
            ]
        );
    }

    #[test]
    fn test_routing_control_mutability() {
        let schema = routing_control_schema();
        assert_eq!(
            schema.configurable(),
            ["cluster_arn", "control_panel_arn", "name"]
        );
        assert_eq!(
            schema.get("control_panel_arn").map(|a| a.mutability),
            Some(Mutability::Optional)
        );
        assert_eq!(schema.get("status").map(|a| a.ty), Some(AttributeType::String));
        assert!(schema.get("routing_control_count").is_none());
    }

    #[test]
    fn test_schema_for_matches_type_name() {
        assert_eq!(
            schema_for(ResourceKind::ControlPanel).type_name,
            ResourceKind::ControlPanel.type_name()
        );
        assert_eq!(
            schema_for(ResourceKind::RoutingControl).type_name,
            ResourceKind::RoutingControl.type_name()
        );
    }

    #[test]
    fn test_schema_serializes_types_lowercase() {
        let json = serde_json::to_value(control_panel_schema()).unwrap();
        let count = &json["attributes"][3];
        assert_eq!(count["name"], "routing_control_count");
        assert_eq!(count["type"], "int");
        assert_eq!(count["mutability"], "computed");
    }
}

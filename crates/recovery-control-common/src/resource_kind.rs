//! Managed resource kinds and deletion ordering
//!
//! Provides consistent naming and deletion priority across the provider.
//! Resources must be deleted in dependency order to avoid failures.

/// Types of Recovery Control Config resources managed by the provider
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ResourceKind {
    /// Control panel (owns routing controls)
    #[strum(to_string = "control-panel", serialize = "control_panel")]
    ControlPanel,
    /// Routing control (optionally placed in a control panel)
    #[strum(to_string = "routing-control", serialize = "routing_control")]
    RoutingControl,
}

impl ResourceKind {
    /// Short CLI-friendly name
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::ControlPanel => "control-panel",
            ResourceKind::RoutingControl => "routing-control",
        }
    }

    /// Fully qualified resource type name
    pub fn type_name(self) -> &'static str {
        match self {
            ResourceKind::ControlPanel => "aws_route53recoverycontrolconfig_control_panel",
            ResourceKind::RoutingControl => "aws_route53recoverycontrolconfig_routing_control",
        }
    }

    /// Human readable name used in error messages
    pub fn display_name(self) -> &'static str {
        match self {
            ResourceKind::ControlPanel => "Control Panel",
            ResourceKind::RoutingControl => "Routing Control",
        }
    }

    /// Get deletion priority (lower number = delete first)
    ///
    /// A control panel cannot be deleted while routing controls still live in
    /// it, so routing controls go first.
    pub fn deletion_priority(self) -> u8 {
        match self {
            ResourceKind::RoutingControl => 0,
            ResourceKind::ControlPanel => 1,
        }
    }
}

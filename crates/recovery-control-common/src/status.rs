//! Remote lifecycle status of Recovery Control Config resources
//!
//! The service reports one of `PENDING`, `DEPLOYED` or `PENDING_DELETION`
//! for both control panels and routing controls.

use serde::{Deserialize, Serialize};

/// Status reported by the service for a control panel or routing control
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ResourceStatus {
    /// Create or update in progress
    Pending,
    /// Ready for use
    Deployed,
    /// Delete in progress
    PendingDeletion,
}

impl ResourceStatus {
    /// Check if an operation is still in flight
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending | Self::PendingDeletion)
    }

    /// Parse from string, returning None for unknown values
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

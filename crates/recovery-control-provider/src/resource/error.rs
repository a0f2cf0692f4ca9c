//! Errors raised by the resource handlers themselves
//!
//! Service failures keep their [`AwsError`](crate::aws::AwsError) in the
//! anyhow chain; these variants cover everything the handlers decide locally.

use recovery_control_common::{ResourceKind, ResourceStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    /// The service accepted a create call but returned no resource
    #[error("error creating Route53 Recovery Control Config {}: empty response", .kind.display_name())]
    EmptyResponse { kind: ResourceKind },

    /// An operation that needs the remote identifier was given none
    #[error("Route53 Recovery Control Config {} has no identifier in state", .kind.display_name())]
    MissingId { kind: ResourceKind },

    /// Read found nothing right after this run created the resource
    #[error("Route53 Recovery Control Config {} ({id}) not found after creation", .kind.display_name())]
    NotFoundAfterCreate { kind: ResourceKind, id: String },

    /// Import pointed at a resource that does not exist
    #[error("cannot import Route53 Recovery Control Config {} ({id}): not found", .kind.display_name())]
    ImportNotFound { kind: ResourceKind, id: String },

    /// The requested change can only be made by destroying and recreating
    #[error("changing `{field}` of a Route53 Recovery Control Config {} requires replacement", .kind.display_name())]
    RequiresReplacement {
        kind: ResourceKind,
        field: &'static str,
    },

    /// A waiter observed a status outside the expected transition
    #[error("Route53 Recovery Control Config {} ({id}) has unexpected status {status}, expected {expected}", .kind.display_name())]
    UnexpectedStatus {
        kind: ResourceKind,
        id: String,
        status: ResourceStatus,
        expected: &'static str,
    },

    /// User configuration failed validation
    #[error("invalid Route53 Recovery Control Config {} configuration: {report}", .kind.display_name())]
    InvalidConfig {
        kind: ResourceKind,
        report: garde::Report,
    },
}

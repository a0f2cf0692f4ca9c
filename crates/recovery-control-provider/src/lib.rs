//! recovery-control-provider - Route 53 Recovery Control Config resources
//!
//! Lifecycle handlers for control panels and routing controls, the AWS client
//! they drive, and the status waiters that block until the service has
//! applied each change.

pub mod aws;
pub mod config;
pub mod resource;
pub mod wait;

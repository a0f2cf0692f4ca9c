//! recovery-control-common - Shared types and utilities
//!
//! This crate provides the types shared between the provider library, its CLI
//! and the integration test helpers, without any AWS SDK dependencies to keep
//! it lightweight.
//!
//! ## Modules
//!
//! - [`defaults`]: Default configuration values
//! - [`resource_kind`]: The managed resource kinds and their deletion order
//! - [`schema`]: Attribute schemas (names, types, mutability) per resource kind
//! - [`status`]: Remote lifecycle status reported by the service

pub mod defaults;
pub mod resource_kind;
pub mod schema;
pub mod status;

// Re-export commonly used types
pub use resource_kind::ResourceKind;
pub use schema::{AttributeSchema, AttributeType, Mutability, ResourceSchema};
pub use status::ResourceStatus;

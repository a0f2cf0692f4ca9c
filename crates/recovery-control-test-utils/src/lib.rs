//! Shared test utilities for recovery-control
//!
//! This crate provides common test helpers that can be used across
//! multiple test modules without circular dependencies.
//!
//! ## Modules
//!
//! - [`aws`]: AWS region detection, cluster lookup and unique resource names

pub mod aws;

// Re-export commonly used items
pub use aws::{get_test_region, test_cluster_arn, test_resource_name, test_run_id};

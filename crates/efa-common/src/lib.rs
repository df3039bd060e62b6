//! Shared types for the "endpoints available for apps" reference page.
//!
//! This crate provides the foundation used by the other `efa-*` crates:
//! - The availability data model (version → category → operations)
//! - Version identifiers
//! - The unified error type with stable codes

pub mod availability;
pub mod error;
pub mod id;

pub use availability::{CategoryMap, OperationDescriptor, VersionedAvailability};
pub use error::{Error, ErrorCategory, Result};
pub use id::VersionId;

/// Schema version for availability data and configuration files.
pub const SCHEMA_VERSION: &str = "1.0.0";

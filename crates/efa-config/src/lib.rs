//! Configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for `config.json`
//! - Config resolution (CLI → env → XDG → /etc → defaults)
//! - Semantic validation

pub mod config;
pub mod resolve;
pub mod validate;

pub use config::{Config, DataConfig, ServerConfig, SiteConfig};
pub use resolve::{load_config, resolve_config, resolve_data_path, ConfigPaths, ConfigSource};
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = efa_common::SCHEMA_VERSION;

//! Typed configuration for swagger-meta.
//!
//! This crate loads the builder defaults and schema generation settings used
//! by `swagger-meta` with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Example
//!
//! ```no_run
//! use swagger_meta_config::ConfigLoader;
//!
//! # fn main() -> Result<(), swagger_meta_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_optional_file("swagger.toml")?
//!     .with_env_prefix("SWAGGER_META")
//!     .load()?;
//!
//! let mut registry = config.registry()?;
//! registry
//!     .endpoint(http::Method::GET, "/health")
//!     .with_description("Liveness probe");
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [defaults]
//! tag = "default"
//! parameter_type = "string"
//! parameter_location = "path"
//! parameter_required = true
//! body_name = "body"
//! body_location = "body"
//! body_required = true
//! success_status = 200
//!
//! [schema]
//! dialect = "draft-07"
//! inline_subschemas = false
//! include_meta_schema = false
//! ```
//!
//! # Environment Variable Overrides
//!
//! Every value can be overridden with `PREFIX__SECTION__KEY`, for example
//! `SWAGGER_META__DEFAULTS__TAG=general` or
//! `SWAGGER_META__SCHEMA__DIALECT=openapi3`.

mod config;
mod error;
mod loader;

pub use config::{DefaultsConfig, MetaConfig, SchemaConfig, PRIMITIVE_TYPES};
pub use error::ConfigError;
pub use loader::ConfigLoader;

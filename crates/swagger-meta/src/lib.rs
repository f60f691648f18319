//! # Swagger Meta
//!
//! Fluent Swagger/OpenAPI 2.0 metadata for route handlers.
//!
//! This crate provides:
//! - **Endpoint descriptors** ([`EndpointInfo`]) holding responses,
//!   parameters, description and tags for one route
//! - **A chainable builder** ([`EndpointBuilder`]) that fills a descriptor in
//!   place
//! - **Schema derivation** through the [`SchemaGenerator`] capability, with a
//!   `schemars`-backed default
//! - **A route store** ([`EndpointRegistry`]) for hosts without one
//!
//! ## Quick Start
//!
//! ```rust
//! use http::{Method, StatusCode};
//! use swagger_meta::{EndpointRegistry, ParameterSpec};
//!
//! #[derive(schemars::JsonSchema)]
//! struct Order {
//!     id: u64,
//!     total_cents: i64,
//! }
//!
//! # fn main() -> Result<(), swagger_meta::SchemaError> {
//! let mut registry = EndpointRegistry::new();
//! registry
//!     .endpoint(Method::GET, "/orders/{id}")
//!     .with_description_and_tags("Fetch an order", ["orders"])
//!     .with_request_parameter(ParameterSpec::new("id").param_type("integer"))
//!     .with_default_response::<Order>()?
//!     .with_response(StatusCode::NOT_FOUND, "Unknown order");
//!
//! let endpoint = registry.get(&Method::GET, "/orders/{id}").unwrap();
//! let json = serde_json::to_value(endpoint).unwrap();
//! assert_eq!(json["parameters"][0]["in"], "path");
//! assert_eq!(json["responses"]["404"]["description"], "Unknown order");
//! # Ok(())
//! # }
//! ```
//!
//! ## Declaration rules
//!
//! - One response per status code; a later declaration replaces an earlier one.
//! - Parameters are appended in call order and never deduplicated.
//! - The description is replaced on every call, but the tag set is written
//!   only once: the first description call on a descriptor without tags
//!   assigns them (or `"default"` when none are given).
//! - Schema generation errors are returned unchanged; nothing else fails.

mod builder;
mod defaults;
mod error;
mod model;
mod registry;
mod schema;

pub use builder::{BodySpec, EndpointBuilder, ParameterSpec};
pub use defaults::BuilderDefaults;
pub use error::{SchemaError, SchemaResult};
pub use model::{
    EndpointInfo, ParameterKind, ParameterLocation, RequestParameter, ResponseInfo,
    SchemaFragment, TypeDefinition,
};
pub use registry::{EndpointRegistry, RouteKey};
pub use schema::{SchemaDialect, SchemaGenerator, SchemarsGenerator, TypeDescriptor};

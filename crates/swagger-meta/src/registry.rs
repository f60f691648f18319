//! In-memory store of route descriptors.
//!
//! Hosts that already keep per-route records can build on
//! [`EndpointInfo`] directly. [`EndpointRegistry`] is for hosts that do not:
//! it keys descriptors by method and path and creates each one the first
//! time metadata is declared for its route.

use std::fmt;

use http::Method;
use indexmap::IndexMap;
use tracing::debug;

use crate::builder::EndpointBuilder;
use crate::defaults::BuilderDefaults;
use crate::model::EndpointInfo;
use crate::schema::{SchemaGenerator, SchemarsGenerator};

/// Identifies a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    /// HTTP method.
    pub method: Method,
    /// Path template (e.g. `/users/{id}`).
    pub path: String,
}

impl RouteKey {
    /// Create a route key.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Descriptors for every documented route, in registration order.
///
/// # Example
///
/// ```
/// use http::{Method, StatusCode};
/// use swagger_meta::EndpointRegistry;
///
/// let mut registry = EndpointRegistry::new();
/// registry
///     .endpoint(Method::DELETE, "/users/{id}")
///     .with_request_parameter("id")
///     .with_response(StatusCode::NO_CONTENT, "Deleted");
///
/// let endpoint = registry.get(&Method::DELETE, "/users/{id}").unwrap();
/// assert_eq!(endpoint.parameters.len(), 1);
/// ```
#[derive(Debug)]
pub struct EndpointRegistry<G = SchemarsGenerator> {
    endpoints: IndexMap<RouteKey, EndpointInfo>,
    schemas: G,
    defaults: BuilderDefaults,
}

impl Default for EndpointRegistry<SchemarsGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointRegistry<SchemarsGenerator> {
    /// Create an empty registry backed by the default `schemars` generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(SchemarsGenerator::default())
    }
}

impl<G: SchemaGenerator> EndpointRegistry<G> {
    /// Create an empty registry using the given schema generator.
    #[must_use]
    pub fn with_generator(schemas: G) -> Self {
        Self {
            endpoints: IndexMap::new(),
            schemas,
            defaults: BuilderDefaults::default(),
        }
    }

    /// Replace the defaults applied by every builder this registry hands out.
    #[must_use]
    pub fn defaults(mut self, defaults: BuilderDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Start declaring metadata for a route, creating its descriptor if needed.
    pub fn endpoint(&mut self, method: Method, path: impl Into<String>) -> EndpointBuilder<'_, G> {
        let key = RouteKey::new(method, path);
        let endpoint = match self.endpoints.entry(key) {
            indexmap::map::Entry::Occupied(entry) => entry.into_mut(),
            indexmap::map::Entry::Vacant(entry) => {
                debug!(route = %entry.key(), "created endpoint descriptor");
                entry.insert(EndpointInfo::new())
            }
        };
        EndpointBuilder::with_defaults(endpoint, &self.schemas, &self.defaults)
    }

    /// Looks up the descriptor of a route.
    pub fn get(&self, method: &Method, path: &str) -> Option<&EndpointInfo> {
        self.endpoints.get(&RouteKey::new(method.clone(), path))
    }

    /// Looks up the descriptor of a route for direct edits.
    pub fn get_mut(&mut self, method: &Method, path: &str) -> Option<&mut EndpointInfo> {
        self.endpoints.get_mut(&RouteKey::new(method.clone(), path))
    }

    /// Removes a route's descriptor, keeping the order of the others.
    pub fn remove(&mut self, method: &Method, path: &str) -> Option<EndpointInfo> {
        self.endpoints
            .shift_remove(&RouteKey::new(method.clone(), path))
    }

    /// Iterates over routes and their descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&RouteKey, &EndpointInfo)> {
        self.endpoints.iter()
    }

    /// Number of documented routes.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns true if no route has been documented.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Returns the schema generator.
    pub fn generator(&self) -> &G {
        &self.schemas
    }

    /// Returns the builder defaults.
    pub fn builder_defaults(&self) -> &BuilderDefaults {
        &self.defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_route_key_display() {
        let key = RouteKey::new(Method::GET, "/users/{id}");
        assert_eq!(key.to_string(), "GET /users/{id}");
    }

    #[test]
    fn test_endpoint_created_once() {
        let mut registry = EndpointRegistry::new();
        registry
            .endpoint(Method::GET, "/users")
            .with_response(StatusCode::OK, "Listed");
        registry
            .endpoint(Method::GET, "/users")
            .with_response(StatusCode::UNAUTHORIZED, "Missing token");

        assert_eq!(registry.len(), 1);
        let endpoint = registry.get(&Method::GET, "/users").unwrap();
        assert_eq!(endpoint.responses.len(), 2);
    }

    #[test]
    fn test_routes_are_independent() {
        let mut registry = EndpointRegistry::new();
        registry
            .endpoint(Method::GET, "/users")
            .with_description_and_tags("List", ["users"]);
        registry
            .endpoint(Method::POST, "/users")
            .with_description("Create");

        let tags: Vec<_> = registry
            .iter()
            .map(|(_, e)| e.tags.clone().unwrap_or_default())
            .collect();
        assert_eq!(tags[0], vec!["users"]);
        assert_eq!(tags[1], vec!["default"]);
    }

    #[test]
    fn test_registration_order_and_remove() {
        let mut registry = EndpointRegistry::new();
        registry.endpoint(Method::GET, "/a");
        registry.endpoint(Method::GET, "/b");
        registry.endpoint(Method::GET, "/c");

        assert!(registry.remove(&Method::GET, "/b").is_some());
        let paths: Vec<_> = registry.iter().map(|(k, _)| k.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/c"]);
        assert!(registry.remove(&Method::GET, "/b").is_none());
    }

    #[test]
    fn test_registry_defaults_apply() {
        let mut registry = EndpointRegistry::new().defaults(BuilderDefaults {
            default_tag: "misc".to_string(),
            ..Default::default()
        });
        registry
            .endpoint(Method::GET, "/health")
            .with_description("Health probe");

        let endpoint = registry.get(&Method::GET, "/health").unwrap();
        assert_eq!(endpoint.tags, Some(vec!["misc".to_string()]));
        assert_eq!(registry.builder_defaults().default_tag, "misc");
    }

    #[test]
    fn test_get_mut() {
        let mut registry = EndpointRegistry::new();
        registry.endpoint(Method::PUT, "/users/{id}");
        registry.get_mut(&Method::PUT, "/users/{id}").unwrap().deprecated = true;
        assert!(registry.get(&Method::PUT, "/users/{id}").unwrap().deprecated);
        assert!(registry.get(&Method::GET, "/users/{id}").is_none());
    }
}

//! Per-route Swagger metadata.
//!
//! These types hold the documentation attached to a single route. They
//! serialize to the OpenAPI 2.0 operation, parameter and response object
//! field names so a document assembler can embed them directly:
//! <https://swagger.io/specification/v2/>

use std::fmt;

use http::StatusCode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON schema fragment produced by a [`SchemaGenerator`](crate::SchemaGenerator).
///
/// The content is opaque to this crate and serialized as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaFragment(Value);

impl SchemaFragment {
    /// Wrap a JSON value as a schema fragment.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the underlying JSON value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the fragment and returns the JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns the `title` keyword, if any.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Returns the `properties` keyword of an object schema.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.get("properties").and_then(Value::as_object)
    }

    /// Returns the names listed under `required`.
    pub fn required(&self) -> Vec<&str> {
        self.0
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<Value> for SchemaFragment {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Where a request parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// URL path segment.
    Path,
    /// Query string.
    Query,
    /// HTTP header.
    Header,
    /// Request body.
    Body,
    /// Form field (`application/x-www-form-urlencoded` or multipart).
    FormData,
}

impl ParameterLocation {
    /// Returns the wire name of the location.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Body => "body",
            Self::FormData => "formData",
        }
    }

    /// Parses a wire name, as written in OpenAPI documents.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "body" => Some(Self::Body),
            "formData" => Some(Self::FormData),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a parameter's value is typed.
///
/// Scalars carry a primitive type name, bodies carry a schema. A parameter
/// is always exactly one of the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterKind {
    /// Structured payload described by a schema.
    Body {
        /// Schema of the payload.
        schema: SchemaFragment,
    },
    /// Primitive value with an optional format hint.
    Scalar {
        /// Primitive type name (`string`, `integer`, ...).
        #[serde(rename = "type")]
        param_type: String,
        /// Format hint (`int64`, `date-time`, ...).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
}

/// A single documented endpoint input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Type or schema of the value.
    #[serde(flatten)]
    pub kind: ParameterKind,
}

impl RequestParameter {
    /// Returns the primitive type name for scalar parameters.
    pub fn param_type(&self) -> Option<&str> {
        match &self.kind {
            ParameterKind::Scalar { param_type, .. } => Some(param_type),
            ParameterKind::Body { .. } => None,
        }
    }

    /// Returns the format hint for scalar parameters.
    pub fn format(&self) -> Option<&str> {
        match &self.kind {
            ParameterKind::Scalar { format, .. } => format.as_deref(),
            ParameterKind::Body { .. } => None,
        }
    }

    /// Returns the schema for body parameters.
    pub fn schema(&self) -> Option<&SchemaFragment> {
        match &self.kind {
            ParameterKind::Body { schema } => Some(schema),
            ParameterKind::Scalar { .. } => None,
        }
    }
}

/// Type of a response header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Primitive type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Format hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TypeDefinition {
    /// Create a definition for the given primitive type.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            format: None,
            description: None,
        }
    }

    /// Create a string definition.
    #[must_use]
    pub fn string() -> Self {
        Self::new("string")
    }

    /// Create an integer definition.
    #[must_use]
    pub fn integer() -> Self {
        Self::new("integer")
    }

    /// Add a format hint.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Add a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One possible response of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseInfo {
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Response headers.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, TypeDefinition>,
    /// Payload schema, present only when a payload type was declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaFragment>,
}

/// Documentation attached to one route.
///
/// Populated through an [`EndpointBuilder`](crate::EndpointBuilder); the
/// fields stay public so hosts can inspect or adjust them directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointInfo {
    /// Unique operation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Full description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags for grouping, stored as supplied. `None` until the first assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Request parameters in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RequestParameter>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: IndexMap<String, ResponseInfo>,
    /// Whether deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

impl EndpointInfo {
    /// Create an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the response declared for a status code.
    pub fn response(&self, status: StatusCode) -> Option<&ResponseInfo> {
        self.responses.get(status.as_str())
    }

    /// Returns the parameters declared under the given name.
    pub fn parameters_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a RequestParameter> + 'a {
        self.parameters.iter().filter(move |p| p.name == name)
    }

    /// Returns true if the tag set has been assigned.
    pub fn has_tags(&self) -> bool {
        self.tags.is_some()
    }
}

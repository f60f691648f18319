//! Fluent declaration of endpoint metadata.
//!
//! An [`EndpointBuilder`] borrows one [`EndpointInfo`] and a
//! [`SchemaGenerator`]. Each declaration mutates the descriptor in place and
//! hands the builder back, so declarations chain:
//!
//! ```
//! use http::StatusCode;
//! use swagger_meta::{BodySpec, EndpointInfo, ParameterSpec, SchemarsGenerator};
//!
//! #[derive(schemars::JsonSchema)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! # fn main() -> Result<(), swagger_meta::SchemaError> {
//! let generator = SchemarsGenerator::default();
//! let mut endpoint = EndpointInfo::new();
//!
//! endpoint
//!     .builder(&generator)
//!     .with_description_and_tags("Update a user", ["users"])
//!     .with_request_parameter(ParameterSpec::new("id").param_type("integer").format("int64"))
//!     .with_request_model::<User>(BodySpec::new().description("New user state"))?
//!     .with_default_response::<User>()?
//!     .with_response(StatusCode::NOT_FOUND, "No such user");
//!
//! assert_eq!(endpoint.parameters.len(), 2);
//! assert_eq!(endpoint.responses.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;

use http::StatusCode;
use schemars::JsonSchema;
use tracing::{debug, warn};

use crate::defaults::BuilderDefaults;
use crate::error::SchemaResult;
use crate::model::{
    EndpointInfo, ParameterKind, ParameterLocation, RequestParameter, ResponseInfo,
    SchemaFragment, TypeDefinition,
};
use crate::schema::{SchemaGenerator, SchemarsGenerator, TypeDescriptor};

/// Arguments of a scalar parameter declaration.
///
/// Anything left unset falls back to the builder's [`BuilderDefaults`].
/// A bare name converts into a `ParameterSpec` with every other argument
/// defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSpec {
    name: String,
    param_type: Option<String>,
    format: Option<String>,
    required: Option<bool>,
    description: Option<String>,
    location: Option<ParameterLocation>,
}

impl ParameterSpec {
    /// Start a declaration for the named parameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Primitive type name.
    #[must_use]
    pub fn param_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = Some(param_type.into());
        self
    }

    /// Format hint.
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Whether the parameter is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Mark the parameter optional.
    #[must_use]
    pub fn optional(self) -> Self {
        self.required(false)
    }

    /// Human description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Where the parameter is read from.
    #[must_use]
    pub fn location(mut self, location: ParameterLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Read the parameter from the query string.
    #[must_use]
    pub fn in_query(self) -> Self {
        self.location(ParameterLocation::Query)
    }

    /// Read the parameter from a header.
    #[must_use]
    pub fn in_header(self) -> Self {
        self.location(ParameterLocation::Header)
    }

    fn resolve(self, defaults: &BuilderDefaults) -> RequestParameter {
        RequestParameter {
            name: self.name,
            location: self.location.unwrap_or(defaults.parameter_location),
            description: self.description,
            required: self.required.unwrap_or(defaults.parameter_required),
            kind: ParameterKind::Scalar {
                param_type: self
                    .param_type
                    .unwrap_or_else(|| defaults.parameter_type.clone()),
                format: self.format,
            },
        }
    }
}

impl From<&str> for ParameterSpec {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ParameterSpec {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Arguments of a request body declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodySpec {
    name: Option<String>,
    description: Option<String>,
    required: Option<bool>,
    location: Option<ParameterLocation>,
}

impl BodySpec {
    /// Start a body declaration with every argument defaulted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameter name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Human description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the body is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Where the payload is read from.
    #[must_use]
    pub fn location(mut self, location: ParameterLocation) -> Self {
        self.location = Some(location);
        self
    }

    fn resolve(self, schema: SchemaFragment, defaults: &BuilderDefaults) -> RequestParameter {
        RequestParameter {
            name: self.name.unwrap_or_else(|| defaults.body_name.clone()),
            location: self.location.unwrap_or(defaults.body_location),
            description: self.description,
            required: self.required.unwrap_or(defaults.body_required),
            kind: ParameterKind::Body { schema },
        }
    }
}

/// Chainable writer over one [`EndpointInfo`].
pub struct EndpointBuilder<'a, G: ?Sized = SchemarsGenerator> {
    endpoint: &'a mut EndpointInfo,
    schemas: &'a G,
    defaults: Cow<'a, BuilderDefaults>,
}

impl<'a, G: SchemaGenerator + ?Sized> EndpointBuilder<'a, G> {
    /// Create a builder using the stock [`BuilderDefaults`].
    pub fn new(endpoint: &'a mut EndpointInfo, schemas: &'a G) -> Self {
        Self {
            endpoint,
            schemas,
            defaults: Cow::Owned(BuilderDefaults::default()),
        }
    }

    /// Create a builder using custom defaults.
    pub fn with_defaults(
        endpoint: &'a mut EndpointInfo,
        schemas: &'a G,
        defaults: &'a BuilderDefaults,
    ) -> Self {
        Self {
            endpoint,
            schemas,
            defaults: Cow::Borrowed(defaults),
        }
    }

    /// Declare a response carrying a payload of type `T`.
    ///
    /// Replaces any response already declared for `status`.
    pub fn with_response_model<T: JsonSchema + ?Sized>(
        self,
        status: StatusCode,
        description: Option<&str>,
    ) -> SchemaResult<Self> {
        self.with_response_model_of(&TypeDescriptor::of::<T>(), status, description)
    }

    /// Declare a response carrying a payload described by `ty`.
    pub fn with_response_model_of(
        self,
        ty: &TypeDescriptor,
        status: StatusCode,
        description: Option<&str>,
    ) -> SchemaResult<Self> {
        let schema = self.schema_of(ty)?;
        debug!(
            status = status.as_u16(),
            schema = ty.name(),
            "declared response model"
        );
        Ok(self.put_response(
            status,
            ResponseInfo {
                description: description.map(str::to_string),
                schema: Some(schema),
                ..Default::default()
            },
        ))
    }

    /// Declare the default success response with a payload of type `T`.
    ///
    /// Same as [`with_response_model`](Self::with_response_model) at the
    /// configured success status (200 unless overridden) without a
    /// description.
    pub fn with_default_response<T: JsonSchema + ?Sized>(self) -> SchemaResult<Self> {
        let status = self.defaults.success_status;
        self.with_response_model::<T>(status, None)
    }

    /// Declare a response without a payload.
    pub fn with_response(self, status: StatusCode, description: impl Into<String>) -> Self {
        debug!(status = status.as_u16(), "declared response");
        self.put_response(
            status,
            ResponseInfo {
                description: Some(description.into()),
                ..Default::default()
            },
        )
    }

    /// Declare a header on the response for `status`.
    ///
    /// Creates a bare response when none has been declared for `status` yet.
    pub fn with_response_header(
        self,
        status: StatusCode,
        name: impl Into<String>,
        definition: TypeDefinition,
    ) -> Self {
        let name = name.into();
        debug!(status = status.as_u16(), header = %name, "declared response header");
        self.endpoint
            .responses
            .entry(status.as_str().to_string())
            .or_default()
            .headers
            .insert(name, definition);
        self
    }

    /// Declare a scalar request parameter.
    ///
    /// Parameters are appended in call order; repeated names are kept.
    pub fn with_request_parameter(self, spec: impl Into<ParameterSpec>) -> Self {
        let parameter = spec.into().resolve(&self.defaults);
        debug!(
            name = %parameter.name,
            location = %parameter.location,
            "declared request parameter"
        );
        self.endpoint.parameters.push(parameter);
        self
    }

    /// Declare a request body of type `T`.
    pub fn with_request_model<T: JsonSchema + ?Sized>(self, spec: BodySpec) -> SchemaResult<Self> {
        self.with_request_model_of(&TypeDescriptor::of::<T>(), spec)
    }

    /// Declare a request body described by `ty`.
    pub fn with_request_model_of(self, ty: &TypeDescriptor, spec: BodySpec) -> SchemaResult<Self> {
        let schema = self.schema_of(ty)?;
        let parameter = spec.resolve(schema, &self.defaults);
        debug!(
            name = %parameter.name,
            location = %parameter.location,
            schema = ty.name(),
            "declared request model"
        );
        self.endpoint.parameters.push(parameter);
        Ok(self)
    }

    /// Set the description without supplying tags.
    ///
    /// See [`with_description_and_tags`](Self::with_description_and_tags).
    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.with_description_and_tags(description, std::iter::empty::<String>())
    }

    /// Set the description and, if no tag set exists yet, the tags.
    ///
    /// The description is always replaced. The tag set is written only by
    /// the first call on a descriptor whose tags are unassigned, in the
    /// supplied order with repeats kept. An empty `tags` then yields the
    /// configured default tag. Once a tag set exists (even an empty one)
    /// later tags are discarded.
    pub fn with_description_and_tags<I, S>(self, description: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.endpoint.tags.is_none() {
            let mut assigned: Vec<String> = tags.into_iter().map(Into::into).collect();
            if assigned.is_empty() {
                assigned.push(self.defaults.default_tag.clone());
            }
            debug!(tags = ?assigned, "assigned tags");
            self.endpoint.tags = Some(assigned);
        } else {
            let discarded = tags.into_iter().count();
            if discarded > 0 {
                debug!(discarded, "tags already assigned, ignoring new tags");
            }
        }

        self.endpoint.description = Some(description.into());
        self
    }

    /// Set the short summary.
    pub fn with_summary(self, summary: impl Into<String>) -> Self {
        self.endpoint.summary = Some(summary.into());
        self
    }

    /// Set the operation identifier.
    pub fn with_operation_id(self, operation_id: impl Into<String>) -> Self {
        self.endpoint.operation_id = Some(operation_id.into());
        self
    }

    /// Mark the endpoint deprecated.
    pub fn deprecated(self) -> Self {
        self.endpoint.deprecated = true;
        self
    }

    /// Returns the descriptor as populated so far.
    pub fn endpoint(&self) -> &EndpointInfo {
        &*self.endpoint
    }

    /// Ends the chain, returning the descriptor.
    pub fn finish(self) -> &'a mut EndpointInfo {
        self.endpoint
    }

    fn schema_of(&self, ty: &TypeDescriptor) -> SchemaResult<SchemaFragment> {
        self.schemas.generate(ty).map_err(|e| {
            warn!(type_name = ty.type_name(), error = %e, "schema generation failed");
            e
        })
    }

    fn put_response(self, status: StatusCode, response: ResponseInfo) -> Self {
        let replaced = self
            .endpoint
            .responses
            .insert(status.as_str().to_string(), response)
            .is_some();
        if replaced {
            debug!(status = status.as_u16(), replaced, "replaced existing response");
        }
        self
    }
}

impl EndpointInfo {
    /// Start a builder chain over this descriptor.
    pub fn builder<'a, G: SchemaGenerator + ?Sized>(
        &'a mut self,
        schemas: &'a G,
    ) -> EndpointBuilder<'a, G> {
        EndpointBuilder::new(self, schemas)
    }
}

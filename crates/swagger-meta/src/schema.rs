//! Type-to-schema derivation.
//!
//! The builder never inspects types itself. It hands a [`TypeDescriptor`] to
//! a [`SchemaGenerator`] and stores whatever fragment comes back.
//! [`SchemarsGenerator`] is the default implementation, backed by
//! `schemars`.

use std::borrow::Cow;
use std::str::FromStr;

use schemars::generate::SchemaSettings;
use schemars::{JsonSchema, Schema};
use serde::{Deserialize, Serialize};

use crate::error::SchemaResult;
use crate::model::SchemaFragment;

/// Describes a Rust type whose schema can be derived.
///
/// # Example
///
/// ```
/// use swagger_meta::TypeDescriptor;
///
/// let ty = TypeDescriptor::of::<Vec<u32>>();
/// assert!(ty.type_name().contains("Vec"));
/// ```
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    type_name: &'static str,
    root_schema: fn(&SchemaSettings) -> Schema,
}

impl TypeDescriptor {
    /// Describe the type `T`.
    #[must_use]
    pub fn of<T: JsonSchema + ?Sized>() -> Self {
        Self {
            name: T::schema_name(),
            type_name: std::any::type_name::<T>(),
            root_schema: root_schema_for::<T>,
        }
    }

    /// Schema name of the type (e.g. `User`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified Rust type name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Build the root schema of the type under the given settings.
    pub fn root_schema(&self, settings: &SchemaSettings) -> Schema {
        (self.root_schema)(settings)
    }
}

fn root_schema_for<T: JsonSchema + ?Sized>(settings: &SchemaSettings) -> Schema {
    settings.clone().into_generator().into_root_schema_for::<T>()
}

/// Derives a schema fragment from a type.
///
/// Implementations must be pure: the same descriptor yields the same
/// fragment. Errors are returned to the builder caller untouched.
pub trait SchemaGenerator {
    /// Produce the schema fragment for `ty`.
    fn generate(&self, ty: &TypeDescriptor) -> SchemaResult<SchemaFragment>;
}

impl<G: SchemaGenerator + ?Sized> SchemaGenerator for &G {
    fn generate(&self, ty: &TypeDescriptor) -> SchemaResult<SchemaFragment> {
        (**self).generate(ty)
    }
}

impl<G: SchemaGenerator + ?Sized> SchemaGenerator for Box<G> {
    fn generate(&self, ty: &TypeDescriptor) -> SchemaResult<SchemaFragment> {
        (**self).generate(ty)
    }
}

/// JSON Schema dialect used by [`SchemarsGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchemaDialect {
    /// Draft 7, with subschemas under `#/definitions/` as Swagger 2.0 expects.
    #[default]
    #[serde(rename = "draft-07")]
    Draft07,
    /// Draft 2019-09.
    #[serde(rename = "draft-2019-09")]
    Draft2019_09,
    /// Draft 2020-12.
    #[serde(rename = "draft-2020-12")]
    Draft2020_12,
    /// OpenAPI 3.0 schema object.
    #[serde(rename = "openapi3")]
    OpenApi3,
}

impl SchemaDialect {
    /// Returns the configuration name of the dialect.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft07 => "draft-07",
            Self::Draft2019_09 => "draft-2019-09",
            Self::Draft2020_12 => "draft-2020-12",
            Self::OpenApi3 => "openapi3",
        }
    }

    fn settings(self) -> SchemaSettings {
        match self {
            Self::Draft07 => SchemaSettings::draft07(),
            Self::Draft2019_09 => SchemaSettings::draft2019_09(),
            Self::Draft2020_12 => SchemaSettings::draft2020_12(),
            Self::OpenApi3 => SchemaSettings::openapi3(),
        }
    }
}

impl FromStr for SchemaDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft-07" | "draft07" => Ok(Self::Draft07),
            "draft-2019-09" | "draft2019_09" => Ok(Self::Draft2019_09),
            "draft-2020-12" | "draft2020_12" => Ok(Self::Draft2020_12),
            "openapi3" => Ok(Self::OpenApi3),
            other => Err(format!("unknown schema dialect: {other}")),
        }
    }
}

/// [`SchemaGenerator`] backed by `schemars`.
///
/// # Example
///
/// ```
/// use swagger_meta::{SchemaGenerator, SchemarsGenerator, TypeDescriptor};
///
/// #[derive(schemars::JsonSchema)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// let generator = SchemarsGenerator::default();
/// let fragment = generator.generate(&TypeDescriptor::of::<User>()).unwrap();
/// assert_eq!(fragment.title(), Some("User"));
/// assert!(fragment.required().contains(&"id"));
/// ```
#[derive(Debug, Clone)]
pub struct SchemarsGenerator {
    dialect: SchemaDialect,
    settings: SchemaSettings,
}

impl Default for SchemarsGenerator {
    fn default() -> Self {
        Self::new(SchemaDialect::default())
    }
}

impl SchemarsGenerator {
    /// Create a generator for the given dialect.
    ///
    /// The `$schema` meta keyword is left out of generated fragments since
    /// they are embedded in a larger document.
    #[must_use]
    pub fn new(dialect: SchemaDialect) -> Self {
        let mut settings = dialect.settings();
        settings.meta_schema = None;
        Self { dialect, settings }
    }

    /// Inline every subschema instead of emitting `definitions` references.
    #[must_use]
    pub fn inline_subschemas(mut self, inline: bool) -> Self {
        self.settings.inline_subschemas = inline;
        self
    }

    /// Keep the `$schema` meta keyword in generated fragments.
    #[must_use]
    pub fn include_meta_schema(mut self, include: bool) -> Self {
        self.settings.meta_schema = if include {
            self.dialect.settings().meta_schema
        } else {
            None
        };
        self
    }

    /// Returns the configured dialect.
    pub fn dialect(&self) -> SchemaDialect {
        self.dialect
    }

    /// Returns the underlying `schemars` settings.
    pub fn settings(&self) -> &SchemaSettings {
        &self.settings
    }
}

impl SchemaGenerator for SchemarsGenerator {
    fn generate(&self, ty: &TypeDescriptor) -> SchemaResult<SchemaFragment> {
        let schema = ty.root_schema(&self.settings);
        Ok(SchemaFragment::new(serde_json::to_value(&schema)?))
    }
}

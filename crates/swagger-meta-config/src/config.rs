//! Configuration types.
//!
//! This module provides the top-level [`MetaConfig`] struct and its sections.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use swagger_meta::{
    BuilderDefaults, EndpointRegistry, ParameterLocation, SchemaDialect, SchemarsGenerator,
};

use crate::ConfigError;

/// Primitive type names accepted for scalar parameters.
pub const PRIMITIVE_TYPES: &[&str] = &["string", "number", "integer", "boolean", "array", "file"];

/// Complete swagger-meta configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use swagger_meta_config::MetaConfig;
///
/// let config = MetaConfig::default();
/// assert_eq!(config.defaults.tag, "default");
/// assert_eq!(config.defaults.success_status, 200);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct MetaConfig {
    /// Values applied when a declaration leaves an argument out.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Schema generation settings.
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// Builder fallback values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct DefaultsConfig {
    /// Tag assigned when the first description call supplies none.
    pub tag: String,
    /// Primitive type of scalar parameters.
    pub parameter_type: String,
    /// Location of scalar parameters.
    pub parameter_location: ParameterLocation,
    /// Whether scalar parameters are required.
    pub parameter_required: bool,
    /// Name of body parameters.
    pub body_name: String,
    /// Location of body parameters.
    pub body_location: ParameterLocation,
    /// Whether body parameters are required.
    pub body_required: bool,
    /// Status code of the default success response.
    pub success_status: u16,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let defaults = BuilderDefaults::default();
        Self {
            tag: defaults.default_tag,
            parameter_type: defaults.parameter_type,
            parameter_location: defaults.parameter_location,
            parameter_required: defaults.parameter_required,
            body_name: defaults.body_name,
            body_location: defaults.body_location,
            body_required: defaults.body_required,
            success_status: defaults.success_status.as_u16(),
        }
    }
}

/// Schema generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields, default)]
pub struct SchemaConfig {
    /// JSON Schema dialect.
    pub dialect: SchemaDialect,
    /// Inline subschemas instead of emitting `definitions` references.
    pub inline_subschemas: bool,
    /// Keep the `$schema` keyword in generated fragments.
    pub include_meta_schema: bool,
}

impl MetaConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - The default tag or body name is empty
    /// - The parameter type is not a Swagger primitive
    /// - The success status is not a valid HTTP status code
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.tag.trim().is_empty() {
            return Err(ConfigError::invalid_value("defaults.tag", "must not be empty"));
        }

        if !PRIMITIVE_TYPES.contains(&self.defaults.parameter_type.as_str()) {
            return Err(ConfigError::invalid_value(
                "defaults.parameter_type",
                format!(
                    "expected one of {}, got '{}'",
                    PRIMITIVE_TYPES.join(", "),
                    self.defaults.parameter_type
                ),
            ));
        }

        if self.defaults.body_name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "defaults.body_name",
                "must not be empty",
            ));
        }

        self.success_status()?;
        Ok(())
    }

    /// Build the defaults the builder applies.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the success status is not a
    /// valid HTTP status code.
    pub fn builder_defaults(&self) -> Result<BuilderDefaults, ConfigError> {
        Ok(BuilderDefaults {
            default_tag: self.defaults.tag.clone(),
            parameter_type: self.defaults.parameter_type.clone(),
            parameter_location: self.defaults.parameter_location,
            parameter_required: self.defaults.parameter_required,
            body_name: self.defaults.body_name.clone(),
            body_location: self.defaults.body_location,
            body_required: self.defaults.body_required,
            success_status: self.success_status()?,
        })
    }

    /// Build the configured schema generator.
    pub fn schema_generator(&self) -> SchemarsGenerator {
        SchemarsGenerator::new(self.schema.dialect)
            .inline_subschemas(self.schema.inline_subschemas)
            .include_meta_schema(self.schema.include_meta_schema)
    }

    /// Build an empty registry using this configuration.
    pub fn registry(&self) -> Result<EndpointRegistry<SchemarsGenerator>, ConfigError> {
        Ok(EndpointRegistry::with_generator(self.schema_generator())
            .defaults(self.builder_defaults()?))
    }

    fn success_status(&self) -> Result<StatusCode, ConfigError> {
        StatusCode::from_u16(self.defaults.success_status).map_err(|_| {
            ConfigError::invalid_value(
                "defaults.success_status",
                format!("invalid status code: {}", self.defaults.success_status),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builder() {
        let config = MetaConfig::default();
        assert_eq!(config.builder_defaults().unwrap(), BuilderDefaults::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_tag_rejected() {
        let mut config = MetaConfig::default();
        config.defaults.tag = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("defaults.tag"));
    }

    #[test]
    fn test_unknown_parameter_type_rejected() {
        let mut config = MetaConfig::default();
        config.defaults.parameter_type = "uuid".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("defaults.parameter_type"));
    }

    #[test]
    fn test_invalid_status_rejected() {
        let mut config = MetaConfig::default();
        config.defaults.success_status = 42;
        assert!(config.validate().is_err());
        assert!(config.builder_defaults().is_err());
    }

    #[test]
    fn test_schema_generator_settings() {
        let mut config = MetaConfig::default();
        config.schema.dialect = SchemaDialect::OpenApi3;
        config.schema.inline_subschemas = true;

        let generator = config.schema_generator();
        assert_eq!(generator.dialect(), SchemaDialect::OpenApi3);
        assert!(generator.settings().inline_subschemas);
        assert!(generator.settings().meta_schema.is_none());
    }

    #[test]
    fn test_registry_uses_defaults() {
        let mut config = MetaConfig::default();
        config.defaults.tag = "general".to_string();

        let registry = config.registry().unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.builder_defaults().default_tag, "general");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<MetaConfig, _> = toml::from_str("[defaults]\ncolour = \"blue\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: MetaConfig =
            toml::from_str("[defaults]\nparameter_location = \"query\"\n").unwrap();
        assert_eq!(config.defaults.parameter_location, ParameterLocation::Query);
        assert_eq!(config.defaults.tag, "default");
        assert_eq!(config.schema, SchemaConfig::default());
    }
}

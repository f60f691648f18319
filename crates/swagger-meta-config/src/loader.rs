//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use swagger_meta::{ParameterLocation, SchemaDialect};
use tracing::debug;

use crate::{ConfigError, MetaConfig};

/// Configuration loader with layered approach.
///
/// The loader applies configuration in layers, with later layers overriding
/// earlier ones:
/// 1. Default values (built into the code)
/// 2. Configuration file or string (TOML or JSON)
/// 3. Environment variables
///
/// # Example
///
/// ```no_run
/// use swagger_meta_config::ConfigLoader;
///
/// # fn main() -> Result<(), swagger_meta_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_file("swagger.toml")?
///     .with_env_prefix("SWAGGER_META")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: MetaConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: MetaConfig::default(),
            env_prefix: None,
        }
    }

    /// Reset to default configuration values.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = MetaConfig::default();
        self
    }

    /// Load configuration from a file.
    ///
    /// Supports TOML (.toml) and JSON (.json) formats.
    /// The file format is determined by the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The file contains invalid TOML/JSON
    /// - The file contains unknown fields
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        self.config = Self::parse_file(&content, path)?;
        debug!(path = %path.display(), "loaded configuration file");

        Ok(self)
    }

    /// Load configuration from an optional file.
    ///
    /// If the file exists, loads it. If not, silently continues.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string.
    ///
    /// # Arguments
    ///
    /// * `content` - Configuration content as a string
    /// * `format` - File format ("toml" or "json")
    ///
    /// # Example
    ///
    /// ```
    /// use swagger_meta_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [defaults]
    ///     tag = "general"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.defaults.tag, "general");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// Environment variables use the format `PREFIX__SECTION__KEY`, e.g.
    /// `SWAGGER_META__DEFAULTS__TAG=general`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Finalize and return the loaded configuration.
    ///
    /// Applies environment variable overrides (if a prefix was set) and
    /// validates the final configuration.
    pub fn load(mut self) -> Result<MetaConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    /// Finalize without validation.
    #[must_use]
    pub fn load_unvalidated(self) -> MetaConfig {
        self.config
    }

    // Parse configuration file based on extension
    fn parse_file(content: &str, path: &Path) -> Result<MetaConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let env_vars: HashMap<String, String> = env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();

        for (key, value) in env_vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(key_without_prefix) = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
        else {
            // Another variable sharing the prefix text, e.g. `PREFIXED_OTHER`
            return Ok(());
        };

        let parts: Vec<&str> = key_without_prefix.split("__").collect();
        let defaults = &mut self.config.defaults;
        let schema = &mut self.config.schema;

        match parts.as_slice() {
            ["DEFAULTS", "TAG"] => defaults.tag = value.to_string(),
            ["DEFAULTS", "PARAMETER_TYPE"] => defaults.parameter_type = value.to_string(),
            ["DEFAULTS", "PARAMETER_LOCATION"] => {
                defaults.parameter_location = parse_location(key, value)?;
            }
            ["DEFAULTS", "PARAMETER_REQUIRED"] => {
                defaults.parameter_required = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["DEFAULTS", "BODY_NAME"] => defaults.body_name = value.to_string(),
            ["DEFAULTS", "BODY_LOCATION"] => {
                defaults.body_location = parse_location(key, value)?;
            }
            ["DEFAULTS", "BODY_REQUIRED"] => {
                defaults.body_required = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["DEFAULTS", "SUCCESS_STATUS"] => {
                defaults.success_status = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }
            ["SCHEMA", "DIALECT"] => {
                schema.dialect = value
                    .parse::<SchemaDialect>()
                    .map_err(|reason| ConfigError::env_parse_error(key, reason))?;
            }
            ["SCHEMA", "INLINE_SUBSCHEMAS"] => {
                schema.inline_subschemas = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["SCHEMA", "INCLUDE_META_SCHEMA"] => {
                schema.include_meta_schema = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            _ => debug!(key, "ignoring unknown configuration variable"),
        }

        Ok(())
    }
}

fn parse_location(key: &str, value: &str) -> Result<ParameterLocation, ConfigError> {
    ParameterLocation::parse(value).ok_or_else(|| {
        ConfigError::env_parse_error(
            key,
            "expected 'path', 'query', 'header', 'body' or 'formData'",
        )
    })
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_new() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, MetaConfig::default());
    }

    #[test]
    fn test_with_string_json() {
        let json = r#"{ "schema": { "dialect": "openapi3", "inline_subschemas": true } }"#;
        let config = ConfigLoader::new()
            .with_string(json, "json")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.schema.dialect, SchemaDialect::OpenApi3);
        assert!(config.schema.inline_subschemas);
    }

    #[test]
    fn test_with_string_unsupported_format() {
        let result = ConfigLoader::new().with_string("a: b", "yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_with_defaults_resets() {
        let config = ConfigLoader::new()
            .with_string("[defaults]\ntag = \"misc\"\n", "toml")
            .unwrap()
            .with_defaults()
            .load()
            .unwrap();
        assert_eq!(config.defaults.tag, "default");
    }

    #[test]
    fn test_load_validates() {
        let result = ConfigLoader::new()
            .with_string("[defaults]\nsuccess_status = 7\n", "toml")
            .unwrap()
            .load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_unvalidated() {
        let config = ConfigLoader::new()
            .with_string("[defaults]\nbody_name = \"\"\n", "toml")
            .unwrap()
            .load_unvalidated();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_env_var() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("APP__DEFAULTS__PARAMETER_LOCATION", "query", "APP")
            .unwrap();
        loader
            .apply_env_var("APP__DEFAULTS__BODY_REQUIRED", "no", "APP")
            .unwrap();
        loader
            .apply_env_var("APP__SCHEMA__DIALECT", "draft-2020-12", "APP")
            .unwrap();
        loader
            .apply_env_var("APP__SOMETHING__ELSE", "x", "APP")
            .unwrap();

        let config = loader.load_unvalidated();
        assert_eq!(config.defaults.parameter_location, ParameterLocation::Query);
        assert!(!config.defaults.body_required);
        assert_eq!(config.schema.dialect, SchemaDialect::Draft2020_12);
    }

    #[test]
    fn test_apply_env_var_errors() {
        let mut loader = ConfigLoader::new();
        assert!(loader
            .apply_env_var("APP__DEFAULTS__SUCCESS_STATUS", "ok", "APP")
            .is_err());
        assert!(loader
            .apply_env_var("APP__DEFAULTS__BODY_LOCATION", "cookie", "APP")
            .is_err());
        assert!(loader
            .apply_env_var("APP__SCHEMA__INLINE_SUBSCHEMAS", "maybe", "APP")
            .is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}

//! Fallback values applied by the builder.

use http::StatusCode;

use crate::model::ParameterLocation;

/// Values used when a declaration leaves an argument out.
///
/// # Example
///
/// ```
/// use swagger_meta::{BuilderDefaults, ParameterLocation};
///
/// let defaults = BuilderDefaults {
///     parameter_location: ParameterLocation::Query,
///     ..Default::default()
/// };
/// assert_eq!(defaults.default_tag, "default");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderDefaults {
    /// Tag assigned when the first description call supplies no tags.
    pub default_tag: String,
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
    pub success_status: StatusCode,
}

impl Default for BuilderDefaults {
    fn default() -> Self {
        Self {
            default_tag: "default".to_string(),
            parameter_type: "string".to_string(),
            parameter_location: ParameterLocation::Path,
            parameter_required: true,
            body_name: "body".to_string(),
            body_location: ParameterLocation::Body,
            body_required: true,
            success_status: StatusCode::OK,
        }
    }
}

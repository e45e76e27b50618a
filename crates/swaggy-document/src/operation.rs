//! Operation metadata carried by every route.

use std::fmt;
use std::str::FromStr;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// A path segment capture (`/users/{id}`).
    Path,
    /// A query string parameter.
    Query,
    /// A request header.
    Header,
}

impl ParamLocation {
    /// Returns the name used by the document (`in:` field).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            other => Err(format!("unsupported parameter location `{other}`")),
        }
    }
}

/// Primitive type tag of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamType {
    /// Free-form text. Used when a declaration has no type.
    #[default]
    String,
    /// Whole number.
    Integer,
    /// Floating point number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Serialized list.
    Array,
    /// Serialized object.
    Object,
}

impl ParamType {
    /// Returns the schema name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "array" => Ok(Self::Array),
            "object" => Ok(Self::Object),
            other => Err(format!("unsupported parameter type `{other}`")),
        }
    }
}

/// A declared operation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Where the parameter is carried.
    pub location: ParamLocation,
    /// Whether the parameter must be present. Always true for path parameters.
    pub required: bool,
    /// Primitive type tag.
    pub param_type: ParamType,
}

impl ParameterSpec {
    /// Creates a parameter declaration.
    pub fn new(name: impl Into<String>, location: ParamLocation, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            location,
            required: location == ParamLocation::Path,
            param_type,
        }
    }

    /// Sets the required flag. Path parameters stay required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required || self.location == ParamLocation::Path;
        self
    }
}

/// Immutable metadata for one (path template, method) operation.
///
/// Owned by the [`Document`](crate::Document) behind an `Arc` and shared,
/// never copied, by every route entry built from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationMetadata {
    /// Operation identifier (`operationId`).
    pub operation_id: Option<String>,
    /// Short human-readable summary.
    pub summary: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Declared parameters in document order.
    pub parameters: Vec<ParameterSpec>,
    /// Whether the operation is deprecated.
    pub deprecated: bool,
    /// Tags in document order.
    pub tags: Vec<String>,
}

impl OperationMetadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation identifier.
    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Appends a parameter declaration.
    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Returns the operation identifier, if declared.
    pub fn operation_id(&self) -> Option<&str> {
        self.operation_id.as_deref()
    }

    /// Returns the summary, if declared.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Returns the declared parameters carried at `location`.
    pub fn parameters_in(&self, location: ParamLocation) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters.iter().filter(move |p| p.location == location)
    }

    /// Looks up a declared parameter by name and location.
    pub fn parameter(&self, name: &str, location: ParamLocation) -> Option<&ParameterSpec> {
        self.parameters
            .iter()
            .find(|p| p.name == name && p.location == location)
    }
}

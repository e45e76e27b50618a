//! Document error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentParseError>;

/// Errors that can occur while loading or projecting a specification document.
///
/// Every variant is fatal to loading: a router is never built from a
/// document that failed to project.
#[derive(Debug, Error)]
pub enum DocumentParseError {
    /// Failed to read the document from disk.
    #[error("failed to read document {path}")]
    Io {
        /// Path of the document.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON parser rejected the document.
    #[error("failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML parser rejected the document.
    #[error("failed to parse YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A node that must be a mapping is something else.
    #[error("{location} must be a mapping")]
    NotAMapping {
        /// Where in the document the node was found.
        location: String,
    },

    /// The document has no `paths` section.
    #[error("document has no `paths` section")]
    MissingPaths,

    /// The `paths` section declares no templates.
    #[error("document `paths` section is empty")]
    EmptyPaths,

    /// A path item declares no HTTP methods.
    #[error("path {path} declares no HTTP methods")]
    NoMethods {
        /// The path template.
        path: String,
    },

    /// A field has the wrong shape.
    #[error("invalid field `{field}` at {location}: expected {expected}")]
    InvalidField {
        /// Where in the document the field was found.
        location: String,
        /// The field name.
        field: String,
        /// The expected shape.
        expected: &'static str,
    },

    /// A parameter declaration is malformed.
    #[error("invalid parameter at {location}: {reason}")]
    InvalidParameter {
        /// Where in the document the parameter was found.
        location: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A `$ref` could not be resolved against the document.
    #[error("unresolved reference {reference}")]
    UnresolvedReference {
        /// The reference string.
        reference: String,
    },
}

impl DocumentParseError {
    /// Create a new read error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new not-a-mapping error.
    pub fn not_a_mapping(location: impl Into<String>) -> Self {
        Self::NotAMapping {
            location: location.into(),
        }
    }

    /// Create a new invalid field error.
    pub fn invalid_field(
        location: impl Into<String>,
        field: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidField {
            location: location.into(),
            field: field.into(),
            expected,
        }
    }

    /// Create a new invalid parameter error.
    pub fn invalid_parameter(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = DocumentParseError::io(
            "/etc/api/openapi.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/etc/api/openapi.yaml"));
    }

    #[test]
    fn test_no_methods_display() {
        let err = DocumentParseError::NoMethods {
            path: "/customers/{id}".to_string(),
        };
        assert!(err.to_string().contains("/customers/{id}"));
    }

    #[test]
    fn test_invalid_field_display() {
        let err = DocumentParseError::invalid_field("GET /users", "summary", "a string");
        let message = err.to_string();
        assert!(message.contains("summary"));
        assert!(message.contains("GET /users"));
        assert!(message.contains("a string"));
    }

    #[test]
    fn test_unresolved_reference_display() {
        let err = DocumentParseError::UnresolvedReference {
            reference: "#/components/parameters/Missing".to_string(),
        };
        assert!(err.to_string().contains("#/components/parameters/Missing"));
    }
}

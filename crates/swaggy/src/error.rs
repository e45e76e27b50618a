//! Router construction errors.

use swaggy_config::ConfigError;
use swaggy_document::DocumentParseError;
use swaggy_router::MalformedTemplateError;
use thiserror::Error;

/// Result type for router construction.
pub type RouterResult<T> = Result<T, RouterError>;

/// Errors that prevent a router from being built.
///
/// All of them surface at load time, before any request is served.
/// A request that matches nothing is not an error.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The specification document could not be read or projected.
    #[error(transparent)]
    Document(#[from] DocumentParseError),

    /// A path template in the document is malformed.
    #[error(transparent)]
    Template(#[from] MalformedTemplateError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configuration names no specification document.
    #[error("no specification document configured (router.spec_path)")]
    MissingSpecPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_is_transparent() {
        let err: RouterError = MalformedTemplateError::EmptyCaptureName {
            template: "/a/{}".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "empty capture name in template /a/{}");
    }

    #[test]
    fn test_document_error_converts() {
        let err: RouterError = DocumentParseError::MissingPaths.into();
        assert!(matches!(err, RouterError::Document(DocumentParseError::MissingPaths)));
    }

    #[test]
    fn test_missing_spec_path_display() {
        assert!(RouterError::MissingSpecPath.to_string().contains("spec_path"));
    }
}

//! Template compilation errors.

use thiserror::Error;

/// A path template that cannot be compiled.
///
/// Fatal to router construction: a router never serves with a partially
/// compiled route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTemplateError {
    /// A capture has no name (`{}`).
    #[error("empty capture name in template {template}")]
    EmptyCaptureName {
        /// The raw template.
        template: String,
    },

    /// The same capture name appears twice in one template.
    #[error("capture `{name}` appears more than once in template {template}")]
    DuplicateCaptureName {
        /// The raw template.
        template: String,
        /// The repeated name.
        name: String,
    },

    /// A capture name contains brace characters.
    #[error("invalid capture name `{name}` in template {template}")]
    InvalidCaptureName {
        /// The raw template.
        template: String,
        /// The offending name.
        name: String,
    },

    /// A segment contains braces without being a whole-segment capture.
    #[error("misplaced brace in segment `{segment}` of template {template}")]
    MisplacedBrace {
        /// The raw template.
        template: String,
        /// The offending segment.
        segment: String,
    },
}

impl MalformedTemplateError {
    /// Returns the raw template that failed to compile.
    pub fn template(&self) -> &str {
        match self {
            Self::EmptyCaptureName { template }
            | Self::DuplicateCaptureName { template, .. }
            | Self::InvalidCaptureName { template, .. }
            | Self::MisplacedBrace { template, .. } => template,
        }
    }
}

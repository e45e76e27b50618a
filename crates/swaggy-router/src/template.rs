//! Path template compilation and path normalization.
//!
//! Templates and request paths go through the same [`segments`] function,
//! so incidental slash repetition never changes a match.

use std::fmt;

use crate::error::MalformedTemplateError;
use crate::params::Params;

/// Splits a path on `/` and drops empty tokens.
///
/// Leading, trailing and repeated slashes are inert:
/// `//customers///123//stuff` yields the same three segments as
/// `/customers/123/stuff`.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Normalizes a raw path into its ordered segments.
///
/// # Example
///
/// ```rust
/// use swaggy_router::normalize;
///
/// assert_eq!(normalize("//customers///123//stuff"), vec!["customers", "123", "stuff"]);
/// assert!(normalize("/").is_empty());
/// ```
pub fn normalize(path: &str) -> Vec<&str> {
    segments(path).collect()
}

/// One compiled unit of a path template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches only an identical segment.
    Literal(String),
    /// Matches any non-empty segment and records it under this name.
    Capture(String),
}

impl Segment {
    /// Returns true if this segment accepts `value`.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Literal(text) => text == value,
            Self::Capture(_) => !value.is_empty(),
        }
    }

    /// Returns true for literal segments.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Capture(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// A path template compiled into an ordered sequence of segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    raw: String,
    segments: Vec<Segment>,
    literal_count: usize,
}

impl CompiledTemplate {
    /// Compiles a raw template such as `/customers/{id}/stuff`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTemplateError`] when a capture name is empty,
    /// repeated, or contains braces, or when a segment mixes literal text
    /// with braces.
    ///
    /// # Example
    ///
    /// ```rust
    /// use swaggy_router::{CompiledTemplate, Segment};
    ///
    /// let template = CompiledTemplate::compile("/customers/{id}/stuff").unwrap();
    /// assert_eq!(template.len(), 3);
    /// assert_eq!(template.segments()[1], Segment::Capture("id".to_string()));
    /// ```
    pub fn compile(template: &str) -> Result<Self, MalformedTemplateError> {
        let mut compiled = Vec::new();

        for token in segments(template) {
            let segment = classify(token, template)?;
            if let Segment::Capture(name) = &segment {
                let duplicate = compiled
                    .iter()
                    .any(|s| matches!(s, Segment::Capture(existing) if existing == name));
                if duplicate {
                    return Err(MalformedTemplateError::DuplicateCaptureName {
                        template: template.to_string(),
                        name: name.clone(),
                    });
                }
            }
            compiled.push(segment);
        }

        let literal_count = compiled.iter().filter(|s| s.is_literal()).count();

        Ok(Self {
            raw: template.to_string(),
            segments: compiled,
            literal_count,
        })
    }

    /// Returns the template as written in the document.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the compiled segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root template (`/`).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of literal segments. Higher is more specific.
    pub fn literal_count(&self) -> usize {
        self.literal_count
    }

    /// Iterates over capture names in template order.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Capture(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns true if every segment accepts the corresponding path segment.
    pub fn matches(&self, path: &[&str]) -> bool {
        self.segments.len() == path.len()
            && self.segments.iter().zip(path).all(|(s, value)| s.matches(value))
    }

    /// Matches normalized path segments and extracts captures.
    pub fn capture(&self, path: &[&str]) -> Option<Params> {
        if !self.matches(path) {
            return None;
        }

        let mut params = Params::with_capacity(self.segments.len() - self.literal_count);
        for (segment, value) in self.segments.iter().zip(path) {
            if let Segment::Capture(name) = segment {
                params.push(name.as_str(), *value);
            }
        }
        Some(params)
    }

    /// Returns true if both templates accept exactly the same paths.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Capture(_), Segment::Capture(_)) => true,
                    _ => false,
                })
    }
}

impl fmt::Display for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

fn classify(token: &str, template: &str) -> Result<Segment, MalformedTemplateError> {
    let is_brace = |c: char| c == '{' || c == '}';

    if let Some(name) = token.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
        if name.is_empty() {
            return Err(MalformedTemplateError::EmptyCaptureName {
                template: template.to_string(),
            });
        }
        if name.contains(is_brace) {
            return Err(MalformedTemplateError::InvalidCaptureName {
                template: template.to_string(),
                name: name.to_string(),
            });
        }
        return Ok(Segment::Capture(name.to_string()));
    }

    if token.contains(is_brace) {
        return Err(MalformedTemplateError::MisplacedBrace {
            template: template.to_string(),
            segment: token.to_string(),
        });
    }

    Ok(Segment::Literal(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_slashes() {
        assert_eq!(normalize("/customers/123/stuff"), vec!["customers", "123", "stuff"]);
        assert_eq!(normalize("//customers///123//stuff"), vec!["customers", "123", "stuff"]);
        assert_eq!(normalize("customers/123/stuff/"), vec!["customers", "123", "stuff"]);
    }

    #[test]
    fn test_normalize_root_and_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize("/").is_empty());
        assert!(normalize("////").is_empty());
    }

    #[test]
    fn test_compile_literals_and_captures() {
        let template = CompiledTemplate::compile("/customers/{id}/stuff").unwrap();
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("customers".to_string()),
                Segment::Capture("id".to_string()),
                Segment::Literal("stuff".to_string()),
            ]
        );
        assert_eq!(template.literal_count(), 2);
        assert_eq!(template.capture_names().collect::<Vec<_>>(), vec!["id"]);
        assert_eq!(template.raw(), "/customers/{id}/stuff");
    }

    #[test]
    fn test_compile_normalizes_like_paths() {
        let messy = CompiledTemplate::compile("//customers///{id}//stuff/").unwrap();
        let clean = CompiledTemplate::compile("/customers/{id}/stuff").unwrap();
        assert_eq!(messy.segments(), clean.segments());
        assert_eq!(messy.to_string(), "/customers/{id}/stuff");
    }

    #[test]
    fn test_compile_root() {
        let root = CompiledTemplate::compile("/").unwrap();
        assert!(root.is_empty());
        assert!(root.matches(&[]));
        assert_eq!(root.to_string(), "/");
    }

    #[test]
    fn test_compile_rejects_empty_capture() {
        let err = CompiledTemplate::compile("/customers/{}").unwrap_err();
        assert!(matches!(err, MalformedTemplateError::EmptyCaptureName { .. }));
    }

    #[test]
    fn test_compile_rejects_duplicate_capture() {
        let err = CompiledTemplate::compile("/a/{id}/b/{id}").unwrap_err();
        assert_eq!(
            err,
            MalformedTemplateError::DuplicateCaptureName {
                template: "/a/{id}/b/{id}".to_string(),
                name: "id".to_string(),
            }
        );
    }

    #[test]
    fn test_compile_rejects_nested_braces() {
        let err = CompiledTemplate::compile("/a/{{id}}").unwrap_err();
        assert!(matches!(err, MalformedTemplateError::InvalidCaptureName { .. }));

        let err = CompiledTemplate::compile("/a/{x}{y}").unwrap_err();
        assert!(matches!(err, MalformedTemplateError::InvalidCaptureName { .. }));
    }

    #[test]
    fn test_compile_rejects_partial_captures() {
        for template in ["/files/report{n}", "/files/{n}.pdf", "/files/{n", "/files/n}"] {
            let err = CompiledTemplate::compile(template).unwrap_err();
            assert!(
                matches!(err, MalformedTemplateError::MisplacedBrace { .. }),
                "{template} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_literal_matching_is_exact() {
        let template = CompiledTemplate::compile("/Users/me").unwrap();
        assert!(template.matches(&["Users", "me"]));
        assert!(!template.matches(&["users", "me"]));
        assert!(!template.matches(&["Users"]));
    }

    #[test]
    fn test_capture_extracts_values() {
        let template = CompiledTemplate::compile("/orgs/{org}/users/{user}").unwrap();
        let params = template.capture(&["orgs", "acme", "users", "42"]).unwrap();
        assert_eq!(params.get("org"), Some("acme"));
        assert_eq!(params.get("user"), Some("42"));
        assert!(template.capture(&["orgs", "acme", "teams", "42"]).is_none());
    }

    #[test]
    fn test_capture_rejects_empty_value() {
        let segment = Segment::Capture("id".to_string());
        assert!(!segment.matches(""));
        assert!(segment.matches("x"));
    }

    #[test]
    fn test_same_shape() {
        let a = CompiledTemplate::compile("/items/{id}").unwrap();
        let b = CompiledTemplate::compile("/items/{itemId}").unwrap();
        let c = CompiledTemplate::compile("/items/active").unwrap();
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }
}

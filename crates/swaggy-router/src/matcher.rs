//! Request matching against a [`RouteTable`].
//!
//! # Algorithm
//!
//! 1. Normalize the request path into segments.
//! 2. Walk entries with the same segment count, in registration order.
//! 3. Keep entries whose template accepts the path; remember their methods.
//! 4. Among those whose method equals the request method, pick the one with
//!    the most literal segments. Ties go to the earliest registration.
//! 5. With no method match, report whether the path matched at all.
//!
//! Request methods are compared case-insensitively: the token is
//! upper-cased before parsing. A token that is not a valid method never
//! equals any entry's method.

use http::Method;
use smallvec::SmallVec;
use swaggy_document::OperationMetadata;
use tracing::trace;

use crate::params::Params;
use crate::table::{RouteEntry, RouteTable};
use crate::template::{segments, CompiledTemplate};

/// Segments held inline while matching.
const INLINE_SEGMENTS: usize = 8;

/// Why a request did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoMatchReason {
    /// No template accepts the path.
    NoPathMatches,
    /// Some template accepts the path, but not for this method.
    PathMatchesMethodDoesNot {
        /// Methods registered for templates that accept the path, in
        /// registration order without duplicates.
        allowed: Vec<Method>,
    },
}

/// A successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    entry: &'a RouteEntry,
    params: Params,
}

impl<'a> RouteMatch<'a> {
    /// The winning entry.
    pub fn entry(&self) -> &'a RouteEntry {
        self.entry
    }

    /// Metadata of the matched operation.
    pub fn operation(&self) -> &'a OperationMetadata {
        self.entry.operation()
    }

    /// The template that matched.
    pub fn template(&self) -> &'a CompiledTemplate {
        self.entry.template()
    }

    /// The method the entry was registered for.
    pub fn method(&self) -> &'a Method {
        self.entry.method()
    }

    /// Values captured from the path.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Takes the captured values.
    pub fn into_params(self) -> Params {
        self.params
    }
}

/// Outcome of matching one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<'a> {
    /// An entry matched both path and method.
    Matched(RouteMatch<'a>),
    /// Nothing matched.
    NoMatch(NoMatchReason),
}

impl<'a> MatchResult<'a> {
    /// Returns true for [`MatchResult::Matched`].
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Returns the match, if any.
    pub fn matched(self) -> Option<RouteMatch<'a>> {
        match self {
            Self::Matched(m) => Some(m),
            Self::NoMatch(_) => None,
        }
    }
}

/// Parses a request method token, ignoring ASCII case.
pub fn parse_method(method: &str) -> Option<Method> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes()).ok()
}

impl RouteTable {
    /// Matches a request method and raw path against the table.
    ///
    /// Never fails: malformed input yields a [`MatchResult::NoMatch`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use http::Method;
    /// use swaggy_document::OperationMetadata;
    /// use swaggy_router::{MatchResult, RouteTable};
    ///
    /// let mut builder = RouteTable::builder();
    /// builder
    ///     .route("/customers/{id}/stuff", Method::GET, OperationMetadata::new())
    ///     .unwrap();
    /// let table = builder.build();
    ///
    /// let MatchResult::Matched(m) = table.match_request("GET", "//customers///123//stuff") else {
    ///     panic!("expected a match");
    /// };
    /// assert_eq!(m.params().get("id"), Some("123"));
    /// ```
    pub fn match_request(&self, method: &str, path: &str) -> MatchResult<'_> {
        let path_segments: SmallVec<[&str; INLINE_SEGMENTS]> = segments(path).collect();
        let method = parse_method(method);

        let mut allowed: Vec<Method> = Vec::new();
        let mut best: Option<&RouteEntry> = None;

        for entry in self.candidates(path_segments.len()) {
            if !entry.template().matches(&path_segments) {
                continue;
            }

            if method.as_ref() != Some(entry.method()) {
                if !allowed.contains(entry.method()) {
                    allowed.push(entry.method().clone());
                }
                continue;
            }

            // Strictly greater: ties keep the earlier registration.
            let better = best.map_or(true, |current| {
                entry.template().literal_count() > current.template().literal_count()
            });
            if better {
                best = Some(entry);
            }
        }

        match best {
            Some(entry) => {
                let params = entry.template().capture(&path_segments).unwrap_or_default();
                trace!(template = entry.template().raw(), method = %entry.method(), "route matched");
                MatchResult::Matched(RouteMatch { entry, params })
            }
            None if allowed.is_empty() => {
                trace!(path, "no route matches path");
                MatchResult::NoMatch(NoMatchReason::NoPathMatches)
            }
            None => {
                trace!(path, ?allowed, "path matches under other methods");
                MatchResult::NoMatch(NoMatchReason::PathMatchesMethodDoesNot { allowed })
            }
        }
    }

    /// Methods registered for templates that accept `path`.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let path_segments: SmallVec<[&str; INLINE_SEGMENTS]> = segments(path).collect();
        let mut allowed: Vec<Method> = Vec::new();
        for entry in self.candidates(path_segments.len()) {
            if entry.template().matches(&path_segments) && !allowed.contains(entry.method()) {
                allowed.push(entry.method().clone());
            }
        }
        allowed
    }
}

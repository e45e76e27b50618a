//! The router: a compiled route table plus a response resolver.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use swaggy_config::{MethodMismatchPolicy, RouterConfig};
use swaggy_document::{Document, DocumentFormat, DocumentLoader};
use swaggy_router::{MatchResult, NoMatchReason, RouteTable};
use swaggy_telemetry::metrics::{record_match, record_response, record_routes_loaded};
use swaggy_telemetry::MatchOutcome;
use tracing::{debug, info};

use crate::error::{RouterError, RouterResult};
use crate::handler::HandlerRegistry;
use crate::request::{RouteRequest, RouteResponse};
use crate::resolver::ResponseResolver;

/// Routes requests according to a specification document.
///
/// A `Router` is immutable once built and cheap to clone; clones share the
/// route table. To serve a new document, build a new router and publish it
/// through a [`RouterHandle`](crate::RouterHandle).
///
/// # Example
///
/// ```
/// use swaggy::{RouteRequest, Router};
/// use swaggy_document::DocumentFormat;
///
/// let yaml = r"
/// paths:
///   /customers/{id}/stuff:
///     get:
///       summary: Retrieve a customer
/// ";
///
/// let router = Router::from_slice(yaml.as_bytes(), DocumentFormat::Yaml).unwrap();
/// let response = router.handle(&RouteRequest::new("GET", "/customers/123/stuff"));
///
/// assert_eq!(response.status, 200);
/// assert_eq!(response.body_str(), Some("Retrieve a customer"));
/// ```
#[derive(Debug, Clone)]
pub struct Router {
    table: Arc<RouteTable>,
    resolver: ResponseResolver,
    title: Option<String>,
}

impl Router {
    /// Builds a router from a projected document.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Template`] if any path template is malformed.
    pub fn from_document(document: &Document) -> RouterResult<Self> {
        let table = RouteTable::from_document(document)?;
        record_routes_loaded(table.len());
        info!(
            title = document.title(),
            paths = document.path_count(),
            routes = table.len(),
            "router built"
        );

        Ok(Self {
            table: Arc::new(table),
            resolver: ResponseResolver::new(),
            title: document.title().map(str::to_string),
        })
    }

    /// Loads a JSON or YAML document from disk and builds a router.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Document`] if the file cannot be read or
    /// projected, [`RouterError::Template`] for malformed templates.
    pub fn from_file(path: impl AsRef<Path>) -> RouterResult<Self> {
        let document = DocumentLoader::from_file(path)?;
        Self::from_document(&document)
    }

    /// Builds a router from document bytes in a known format.
    ///
    /// # Errors
    ///
    /// See [`Router::from_file`].
    pub fn from_slice(bytes: &[u8], format: DocumentFormat) -> RouterResult<Self> {
        let document = DocumentLoader::from_slice(bytes, format)?;
        Self::from_document(&document)
    }

    /// Builds a router as described by configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MissingSpecPath`] when no document is
    /// configured, otherwise see [`Router::from_file`].
    pub fn from_config(config: &RouterConfig) -> RouterResult<Self> {
        let path = config.spec_path.as_ref().ok_or(RouterError::MissingSpecPath)?;
        Ok(Self::from_file(path)?
            .with_policy(config.method_mismatch)
            .with_placeholder(config.placeholder_body.clone()))
    }

    /// Sets the response policy for method mismatches.
    #[must_use]
    pub fn with_policy(mut self, policy: MethodMismatchPolicy) -> Self {
        self.resolver = self.resolver.with_policy(policy);
        self
    }

    /// Sets the body for matched operations without a summary.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<Bytes>) -> Self {
        self.resolver = self.resolver.with_placeholder(placeholder);
        self
    }

    /// Sets the handlers dispatched for matched operations.
    #[must_use]
    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.resolver = self.resolver.with_handlers(handlers);
        self
    }

    /// The compiled route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The response resolver.
    pub fn resolver(&self) -> &ResponseResolver {
        &self.resolver
    }

    /// The document title, if it declared one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Matches a method and raw path without resolving a response.
    pub fn match_request(&self, method: &str, path: &str) -> MatchResult<'_> {
        self.table.match_request(method, path)
    }

    /// Matches a request and resolves its response.
    pub fn handle(&self, request: &RouteRequest) -> RouteResponse {
        let started = Instant::now();
        let result = self.table.match_request(&request.method, &request.path);
        record_match(outcome(&result), started.elapsed());

        let response = self.resolver.resolve(&result);
        record_response(response.status.as_u16());

        debug!(
            method = %request.method,
            path = %request.path,
            status = response.status.as_u16(),
            "request resolved"
        );
        response
    }
}

fn outcome(result: &MatchResult<'_>) -> MatchOutcome {
    match result {
        MatchResult::Matched(_) => MatchOutcome::Matched,
        MatchResult::NoMatch(NoMatchReason::NoPathMatches) => MatchOutcome::NoPath,
        MatchResult::NoMatch(NoMatchReason::PathMatchesMethodDoesNot { .. }) => {
            MatchOutcome::MethodMismatch
        }
    }
}

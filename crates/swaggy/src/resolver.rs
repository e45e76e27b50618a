//! Turning a match result into a response.

use std::sync::Arc;

use bytes::Bytes;
use swaggy_config::MethodMismatchPolicy;
use swaggy_router::{MatchResult, NoMatchReason, RouteMatch};
use tracing::trace;

use crate::handler::HandlerRegistry;
use crate::request::RouteResponse;

/// Default body for matched operations without a summary.
pub const DEFAULT_PLACEHOLDER: &str = "OK";

/// Maps every [`MatchResult`] to a [`RouteResponse`].
///
/// | Result | Response |
/// |--------|----------|
/// | matched, handler registered | the handler's response |
/// | matched | `200`, body = summary or placeholder |
/// | no path | `404 Not Found` |
/// | method mismatch | `404`, or `405` with `Allow` under [`MethodMismatchPolicy::MethodNotAllowed`] |
#[derive(Debug, Clone)]
pub struct ResponseResolver {
    policy: MethodMismatchPolicy,
    placeholder: Bytes,
    handlers: Arc<HandlerRegistry>,
}

impl Default for ResponseResolver {
    fn default() -> Self {
        Self {
            policy: MethodMismatchPolicy::default(),
            placeholder: Bytes::from_static(DEFAULT_PLACEHOLDER.as_bytes()),
            handlers: Arc::new(HandlerRegistry::new()),
        }
    }
}

impl ResponseResolver {
    /// Creates a resolver with the default policy and placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the method mismatch policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MethodMismatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the body used when a matched operation has no summary.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<Bytes>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the handlers consulted for matched operations.
    #[must_use]
    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = Arc::new(handlers);
        self
    }

    /// The active method mismatch policy.
    pub fn policy(&self) -> MethodMismatchPolicy {
        self.policy
    }

    /// The registered handlers.
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Resolves a match result into a response.
    pub fn resolve(&self, result: &MatchResult<'_>) -> RouteResponse {
        match result {
            MatchResult::Matched(route) => self.resolve_match(route),
            MatchResult::NoMatch(NoMatchReason::NoPathMatches) => RouteResponse::not_found(),
            MatchResult::NoMatch(NoMatchReason::PathMatchesMethodDoesNot { allowed }) => {
                match self.policy {
                    MethodMismatchPolicy::NotFound => RouteResponse::not_found(),
                    MethodMismatchPolicy::MethodNotAllowed => {
                        RouteResponse::method_not_allowed(allowed)
                    }
                }
            }
        }
    }

    fn resolve_match(&self, route: &RouteMatch<'_>) -> RouteResponse {
        if let Some(response) = self.handlers.dispatch(route) {
            trace!(
                operation_id = route.operation().operation_id(),
                status = response.status.as_u16(),
                "handler dispatched"
            );
            return response;
        }

        match route.operation().summary() {
            Some(summary) => RouteResponse::ok(summary.to_string()),
            None => RouteResponse::ok(self.placeholder.clone()),
        }
    }
}

//! Handler registration and dispatch.
//!
//! Handlers are plain synchronous functions registered against an
//! `operationId` from the document. A matched request whose operation has
//! a registered handler gets that handler's response instead of the
//! placeholder.
//!
//! # Example
//!
//! ```rust
//! use swaggy::{HandlerRegistry, RouteContext, RouteResponse};
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register("getCustomerStuff", |ctx: &RouteContext<'_>| {
//!     let id = ctx.param("id").unwrap_or_default();
//!     RouteResponse::ok(format!("stuff for {id}"))
//! });
//!
//! assert!(registry.contains("getCustomerStuff"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use swaggy_document::OperationMetadata;
use swaggy_router::{CompiledTemplate, Params, RouteMatch};

use crate::request::RouteResponse;

/// A type-erased handler function.
pub type Handler = Arc<dyn Fn(&RouteContext<'_>) -> RouteResponse + Send + Sync>;

/// What a handler sees of a matched request.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    operation: &'a OperationMetadata,
    template: &'a CompiledTemplate,
    params: &'a Params,
}

impl<'a> RouteContext<'a> {
    /// Builds a context from a successful match.
    pub fn from_match(route: &'a RouteMatch<'a>) -> Self {
        Self {
            operation: route.operation(),
            template: route.template(),
            params: route.params(),
        }
    }

    /// Metadata of the matched operation.
    pub fn operation(&self) -> &'a OperationMetadata {
        self.operation
    }

    /// The template that matched.
    pub fn template(&self) -> &'a CompiledTemplate {
        self.template
    }

    /// All captured path values.
    pub fn params(&self) -> &'a Params {
        self.params
    }

    /// One captured path value.
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.params.get(name)
    }
}

/// Registry mapping operation ids to handlers.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `operation_id`, replacing any previous one.
    pub fn register<F>(&mut self, operation_id: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&RouteContext<'_>) -> RouteResponse + Send + Sync + 'static,
    {
        self.handlers.insert(operation_id.into(), Arc::new(handler));
        self
    }

    /// Looks up a handler by operation id.
    #[must_use]
    pub fn get(&self, operation_id: &str) -> Option<&Handler> {
        self.handlers.get(operation_id)
    }

    /// Checks whether a handler is registered for an operation.
    #[must_use]
    pub fn contains(&self, operation_id: &str) -> bool {
        self.handlers.contains_key(operation_id)
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates over registered operation ids, in no particular order.
    pub fn operation_ids(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Invokes the handler registered for the matched operation, if any.
    pub fn dispatch(&self, route: &RouteMatch<'_>) -> Option<RouteResponse> {
        let operation_id = route.operation().operation_id()?;
        let handler = self.handlers.get(operation_id)?;
        Some(handler(&RouteContext::from_match(route)))
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.operation_ids().collect();
        ids.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("operations", &ids)
            .finish()
    }
}

//! Specification-driven HTTP request routing.
//!
//! Swaggy reads an OpenAPI (3.x) or Swagger (2.0) document, compiles every
//! declared path template, and answers each incoming request with the
//! operation it matches, or a 404 / 405 when it matches none.
//!
//! # Overview
//!
//! ```text
//!  document ──► swaggy-document ──► swaggy-router ──► Router::handle ──► RouteResponse
//!  (JSON/YAML)   (typed model)      (route table)     (match+resolve)
//! ```
//!
//! - [`Router`] owns an immutable route table and a [`ResponseResolver`]
//! - [`RouterHandle`] publishes a router and swaps it wholesale on reload
//! - [`HandlerRegistry`] binds real handlers to `operationId`s
//! - [`RequestStage`] is the trait a host calls per request
//!
//! # Example
//!
//! ```
//! use http::StatusCode;
//! use swaggy::{MethodMismatchPolicy, RouteRequest, Router};
//! use swaggy_document::DocumentFormat;
//!
//! let yaml = r"
//! paths:
//!   /customers/{id}/stuff:
//!     get:
//!       operationId: getCustomerStuff
//!       summary: Retrieve a customer
//! ";
//!
//! let router = Router::from_slice(yaml.as_bytes(), DocumentFormat::Yaml)
//!     .unwrap()
//!     .with_policy(MethodMismatchPolicy::MethodNotAllowed);
//!
//! let ok = router.handle(&RouteRequest::new("GET", "//customers///123//stuff"));
//! assert_eq!(ok.status, StatusCode::OK);
//! assert_eq!(ok.body_str(), Some("Retrieve a customer"));
//!
//! let wrong_method = router.handle(&RouteRequest::new("POST", "/customers/123/stuff"));
//! assert_eq!(wrong_method.status, StatusCode::METHOD_NOT_ALLOWED);
//! assert_eq!(wrong_method.headers["allow"], "GET");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod handle;
mod handler;
mod request;
mod resolver;
mod router;
mod stage;

pub use error::{RouterError, RouterResult};
pub use handle::RouterHandle;
pub use handler::{Handler, HandlerRegistry, RouteContext};
pub use request::{RouteRequest, RouteResponse};
pub use resolver::{ResponseResolver, DEFAULT_PLACEHOLDER};
pub use router::Router;
pub use stage::RequestStage;

pub use swaggy_config::{MethodMismatchPolicy, RouterConfig};
pub use swaggy_router::{MatchResult, NoMatchReason, Params, RouteMatch};

//! Path template compilation and request matching for Swaggy.
//!
//! Templates from a specification document (`/customers/{id}/stuff`) are
//! compiled into segment sequences and collected into a [`RouteTable`].
//! Requests are matched by normalizing the path the same way and comparing
//! segment by segment.
//!
//! # Features
//!
//! - **Slash-insensitive**: leading, trailing and repeated slashes never
//!   change a match
//! - **Whole-segment captures**: `{name}` binds one non-empty segment
//! - **Specificity**: more literal segments beat more captures; ties go to
//!   document order
//! - **Method-aware misses**: a miss tells a wrong path apart from a wrong
//!   method and lists the methods that would have matched
//!
//! # Example
//!
//! ```rust
//! use http::Method;
//! use swaggy_document::OperationMetadata;
//! use swaggy_router::{MatchResult, NoMatchReason, RouteTable};
//!
//! let mut builder = RouteTable::builder();
//! builder
//!     .route("/items/{id}", Method::GET, OperationMetadata::new().with_operation_id("getItem"))
//!     .unwrap()
//!     .route("/items/active", Method::GET, OperationMetadata::new().with_operation_id("active"))
//!     .unwrap();
//! let table = builder.build();
//!
//! let m = table.match_request("GET", "/items/active").matched().unwrap();
//! assert_eq!(m.operation().operation_id(), Some("active"));
//!
//! assert_eq!(
//!     table.match_request("DELETE", "/items/7"),
//!     MatchResult::NoMatch(NoMatchReason::PathMatchesMethodDoesNot { allowed: vec![Method::GET] })
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod matcher;
mod params;
mod table;
mod template;

pub use error::MalformedTemplateError;
pub use matcher::{parse_method, MatchResult, NoMatchReason, RouteMatch};
pub use params::Params;
pub use table::{RouteEntry, RouteTable, RouteTableBuilder};
pub use template::{normalize, segments, CompiledTemplate, Segment};

//! Typed routing model for Swaggy.
//!
//! This crate turns an OpenAPI (3.x) or Swagger (2.0) document into the
//! small, strictly typed model the router needs: a mapping from raw path
//! templates to the HTTP methods they accept and the metadata of each
//! operation.
//!
//! # Overview
//!
//! Loading happens in two steps:
//!
//! 1. `serde_json` or `serde_yaml` parses the bytes into a generic,
//!    order-preserving tree.
//! 2. [`Document::from_value`] projects that tree, failing fast on any
//!    missing or wrongly shaped field.
//!
//! Document order is preserved end to end; the router relies on it for
//! first-registration priority.
//!
//! # Example
//!
//! ```
//! use swaggy_document::{DocumentFormat, DocumentLoader};
//! use http::Method;
//!
//! let yaml = r"
//! paths:
//!   /customers/{id}/stuff:
//!     get:
//!       summary: Retrieve a customer
//! ";
//!
//! let doc = DocumentLoader::from_str(yaml, DocumentFormat::Yaml).unwrap();
//! let get = &doc.operations("/customers/{id}/stuff").unwrap()[&Method::GET];
//! assert_eq!(get.summary(), Some("Retrieve a customer"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod loader;
pub mod operation;

pub use document::{Document, Operations};
pub use error::{DocumentParseError, DocumentResult};
pub use loader::{DocumentFormat, DocumentLoader};
pub use operation::{OperationMetadata, ParamLocation, ParamType, ParameterSpec};

//! The route table: compiled templates paired with methods and operations.
//!
//! Entries keep registration order, which is document order when the table
//! is built from a [`Document`]. A side index buckets entries by segment
//! count so matching only walks templates of the right length.

use std::sync::Arc;

use http::Method;
use swaggy_document::{Document, OperationMetadata};
use tracing::{debug, warn};

use crate::error::MalformedTemplateError;
use crate::template::CompiledTemplate;

/// One routable `(template, method)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    template: Arc<CompiledTemplate>,
    method: Method,
    operation: Arc<OperationMetadata>,
    index: usize,
}

impl RouteEntry {
    /// The compiled template. Shared by every method of the same path.
    pub fn template(&self) -> &CompiledTemplate {
        &self.template
    }

    /// The method this entry accepts.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The operation metadata from the document.
    pub fn operation(&self) -> &OperationMetadata {
        &self.operation
    }

    /// Shared handle to the operation metadata.
    pub fn operation_arc(&self) -> &Arc<OperationMetadata> {
        &self.operation
    }

    /// Registration index. Lower wins ties.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Immutable collection of route entries.
///
/// Built once, then read concurrently without synchronization.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    /// `by_length[n]` holds indices of entries with `n` segments, ascending.
    by_length: Vec<Vec<usize>>,
}

impl RouteTable {
    /// Returns a builder for assembling a table by hand.
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Builds a table from every `(template, method)` pair in `document`.
    ///
    /// # Errors
    ///
    /// Returns the first [`MalformedTemplateError`]; no partial table is
    /// produced.
    pub fn from_document(document: &Document) -> Result<Self, MalformedTemplateError> {
        let mut builder = Self::builder();
        for (raw, operations) in document.paths() {
            let template = Arc::new(CompiledTemplate::compile(raw)?);
            for (method, operation) in operations {
                builder.push_compiled(Arc::clone(&template), method.clone(), Arc::clone(operation));
            }
        }
        Ok(builder.build())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Entries whose template has exactly `len` segments, in registration order.
    pub(crate) fn candidates(&self, len: usize) -> impl Iterator<Item = &RouteEntry> {
        self.by_length
            .get(len)
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
    }
}

/// Builder for [`RouteTable`].
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    entries: Vec<RouteEntry>,
}

impl RouteTableBuilder {
    /// Compiles `template` and registers it for `method`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTemplateError`] if the template does not compile.
    pub fn route(
        &mut self,
        template: &str,
        method: Method,
        operation: OperationMetadata,
    ) -> Result<&mut Self, MalformedTemplateError> {
        let compiled = Arc::new(CompiledTemplate::compile(template)?);
        Ok(self.push_compiled(compiled, method, Arc::new(operation)))
    }

    fn push_compiled(
        &mut self,
        template: Arc<CompiledTemplate>,
        method: Method,
        operation: Arc<OperationMetadata>,
    ) -> &mut Self {
        let index = self.entries.len();
        self.entries.push(RouteEntry {
            template,
            method,
            operation,
            index,
        });
        self
    }

    /// Finishes the table.
    pub fn build(self) -> RouteTable {
        let mut by_length: Vec<Vec<usize>> = Vec::new();
        for entry in &self.entries {
            let len = entry.template.len();
            if by_length.len() <= len {
                by_length.resize_with(len + 1, Vec::new);
            }
            by_length[len].push(entry.index);
        }

        let table = RouteTable {
            entries: self.entries,
            by_length,
        };
        report_shadowed(&table);
        debug!(routes = table.len(), "route table built");
        table
    }
}

/// Logs entries that can never win because an earlier entry accepts the
/// same paths for the same method.
fn report_shadowed(table: &RouteTable) {
    for bucket in &table.by_length {
        for (pos, &later) in bucket.iter().enumerate() {
            let later = &table.entries[later];
            let shadow = bucket[..pos].iter().map(|&i| &table.entries[i]).find(|earlier| {
                earlier.method == later.method && earlier.template.same_shape(&later.template)
            });
            if let Some(earlier) = shadow {
                warn!(
                    method = %later.method,
                    template = later.template.raw(),
                    shadowed_by = earlier.template.raw(),
                    "route is unreachable"
                );
            }
        }
    }
}

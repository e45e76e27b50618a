//! Projection of a parsed specification tree into the routing model.
//!
//! The parser hands over an untyped tree of maps, lists and scalars. This
//! module walks the subset relevant to routing (`paths`, operations and
//! their parameters) and either produces a fully typed [`Document`] or fails
//! with the first structural problem it finds.

use std::sync::Arc;

use http::Method;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{DocumentParseError, DocumentResult};
use crate::operation::{OperationMetadata, ParamLocation, ParamType, ParameterSpec};

/// Operations declared on one path template, keyed by method in document order.
pub type Operations = IndexMap<Method, Arc<OperationMetadata>>;

/// Method keys recognised inside a path item.
const METHOD_KEYS: [(&str, Method); 8] = [
    ("get", Method::GET),
    ("put", Method::PUT),
    ("post", Method::POST),
    ("delete", Method::DELETE),
    ("options", Method::OPTIONS),
    ("head", Method::HEAD),
    ("patch", Method::PATCH),
    ("trace", Method::TRACE),
];

/// Upper bound on chained `$ref` hops before giving up.
const MAX_REF_DEPTH: usize = 16;

/// The routing-relevant subset of a specification document.
///
/// Maps each raw path template to the operations it declares. Iteration
/// order is document order, which is also route registration order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    title: Option<String>,
    version: Option<String>,
    paths: IndexMap<String, Operations>,
}

impl Document {
    /// Creates an empty document.
    ///
    /// Documents loaded from a source are never empty; this exists for
    /// programmatic construction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects a parsed tree into a typed document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentParseError`] if the tree lacks `paths`, a path
    /// declares no methods, or any operation field has the wrong shape.
    pub fn from_value(root: &Value) -> DocumentResult<Self> {
        let root_map = root
            .as_object()
            .ok_or_else(|| DocumentParseError::not_a_mapping("document root"))?;

        let paths = root_map.get("paths").ok_or(DocumentParseError::MissingPaths)?;
        let paths = paths
            .as_object()
            .ok_or_else(|| DocumentParseError::not_a_mapping("paths"))?;
        if paths.is_empty() {
            return Err(DocumentParseError::EmptyPaths);
        }

        let info = root_map.get("info");
        let title = info.and_then(|i| i.get("title")).and_then(scalar_text);
        let version = info.and_then(|i| i.get("version")).and_then(scalar_text);

        let projector = Projector { root };
        let mut projected = IndexMap::with_capacity(paths.len());
        for (template, item) in paths {
            let operations = projector.path_item(template, item)?;
            projected.insert(template.clone(), operations);
        }

        debug!(
            paths = projected.len(),
            operations = projected.values().map(IndexMap::len).sum::<usize>(),
            "document projected"
        );

        Ok(Self {
            title,
            version,
            paths: projected,
        })
    }

    /// Adds an operation, creating the path entry if needed.
    ///
    /// An existing operation for the same template and method is replaced.
    pub fn insert(
        &mut self,
        template: impl Into<String>,
        method: Method,
        operation: OperationMetadata,
    ) -> &mut Self {
        self.paths
            .entry(template.into())
            .or_default()
            .insert(method, Arc::new(operation));
        self
    }

    /// Returns the document title (`info.title`).
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the document version (`info.version`).
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the operations declared on a template.
    pub fn operations(&self, template: &str) -> Option<&Operations> {
        self.paths.get(template)
    }

    /// Iterates over path templates and their operations in document order.
    pub fn paths(&self) -> impl Iterator<Item = (&str, &Operations)> {
        self.paths.iter().map(|(t, ops)| (t.as_str(), ops))
    }

    /// Returns the number of path templates.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Returns the number of (template, method) operations.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(IndexMap::len).sum()
    }

    /// Returns true if the document declares no operations.
    pub fn is_empty(&self) -> bool {
        self.operation_count() == 0
    }
}

/// Walks the tree with access to the root for `$ref` resolution.
struct Projector<'a> {
    root: &'a Value,
}

impl<'a> Projector<'a> {
    fn path_item(&self, template: &str, item: &'a Value) -> DocumentResult<Operations> {
        let item = item
            .as_object()
            .ok_or_else(|| DocumentParseError::not_a_mapping(format!("path {template}")))?;

        if item.contains_key("$ref") {
            warn!(path = template, "path item $ref is not followed");
        }

        let shared = self.parameters(item.get("parameters"), template)?;

        let mut operations = Operations::new();
        for (key, raw) in item {
            let Some(method) = method_for_key(key) else {
                continue;
            };
            let location = format!("{method} {template}");
            let operation = self.operation(raw, &shared, &location)?;
            operations.insert(method.clone(), Arc::new(operation));
        }

        if operations.is_empty() {
            return Err(DocumentParseError::NoMethods {
                path: template.to_string(),
            });
        }

        Ok(operations)
    }

    fn operation(
        &self,
        raw: &'a Value,
        shared: &[ParameterSpec],
        location: &str,
    ) -> DocumentResult<OperationMetadata> {
        let op = raw
            .as_object()
            .ok_or_else(|| DocumentParseError::not_a_mapping(location))?;

        let mut parameters = shared.to_vec();
        for param in self.parameters(op.get("parameters"), location)? {
            match parameters
                .iter_mut()
                .find(|p| p.name == param.name && p.location == param.location)
            {
                Some(existing) => *existing = param,
                None => parameters.push(param),
            }
        }

        let deprecated = match op.get("deprecated") {
            None => false,
            Some(value) => value
                .as_bool()
                .ok_or_else(|| DocumentParseError::invalid_field(location, "deprecated", "a boolean"))?,
        };

        let tags = match op.get("tags") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|tag| {
                    tag.as_str().map(str::to_string).ok_or_else(|| {
                        DocumentParseError::invalid_field(location, "tags", "a list of strings")
                    })
                })
                .collect::<DocumentResult<_>>()?,
            Some(_) => {
                return Err(DocumentParseError::invalid_field(
                    location,
                    "tags",
                    "a list of strings",
                ))
            }
        };

        Ok(OperationMetadata {
            operation_id: optional_string(op, "operationId", location)?,
            summary: optional_string(op, "summary", location)?,
            description: optional_string(op, "description", location)?,
            parameters,
            deprecated,
            tags,
        })
    }

    fn parameters(&self, raw: Option<&'a Value>, location: &str) -> DocumentResult<Vec<ParameterSpec>> {
        let items = match raw {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(DocumentParseError::invalid_field(
                    location,
                    "parameters",
                    "a list",
                ))
            }
        };

        let mut specs = Vec::with_capacity(items.len());
        for item in items {
            if let Some(spec) = self.parameter(item, location)? {
                specs.push(spec);
            }
        }
        Ok(specs)
    }

    fn parameter(&self, raw: &'a Value, location: &str) -> DocumentResult<Option<ParameterSpec>> {
        let resolved = self.resolve(raw, location)?;
        let param = resolved
            .as_object()
            .ok_or_else(|| DocumentParseError::invalid_parameter(location, "not a mapping"))?;

        let name = param
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| DocumentParseError::invalid_parameter(location, "missing `name`"))?;
        let carried_in = param
            .get("in")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                DocumentParseError::invalid_parameter(location, format!("`{name}` is missing `in`"))
            })?;

        if carried_in == "cookie" {
            debug!(parameter = name, location, "skipping cookie parameter");
            return Ok(None);
        }

        let param_location: ParamLocation = carried_in
            .parse()
            .map_err(|reason: String| DocumentParseError::invalid_parameter(location, reason))?;

        let required = match param.get("required") {
            None => false,
            Some(value) => value.as_bool().ok_or_else(|| {
                DocumentParseError::invalid_parameter(
                    location,
                    format!("`{name}` has a non-boolean `required`"),
                )
            })?,
        };

        let param_type = self.parameter_type(param, name, location)?;

        Ok(Some(
            ParameterSpec::new(name, param_location, param_type).required(required),
        ))
    }

    /// Reads `schema.type` (OpenAPI 3) or `type` (Swagger 2).
    fn parameter_type(
        &self,
        param: &'a Map<String, Value>,
        name: &str,
        location: &str,
    ) -> DocumentResult<ParamType> {
        let schema = match param.get("schema") {
            Some(schema) => Some(self.resolve(schema, location)?),
            None => None,
        };
        let declared = schema
            .and_then(|s| s.get("type"))
            .or_else(|| param.get("type"));

        let tag = match declared {
            None => return Ok(ParamType::default()),
            Some(Value::String(tag)) => tag.as_str(),
            // OpenAPI 3.1 allows `type: [string, "null"]`
            Some(Value::Array(tags)) => match tags
                .iter()
                .filter_map(Value::as_str)
                .find(|t| *t != "null")
            {
                Some(tag) => tag,
                None => return Ok(ParamType::default()),
            },
            Some(_) => {
                return Err(DocumentParseError::invalid_parameter(
                    location,
                    format!("`{name}` has a malformed type"),
                ))
            }
        };

        tag.parse()
            .map_err(|reason: String| DocumentParseError::invalid_parameter(location, reason))
    }

    /// Follows local `$ref` pointers until a concrete node is reached.
    fn resolve(&self, mut node: &'a Value, location: &str) -> DocumentResult<&'a Value> {
        for _ in 0..MAX_REF_DEPTH {
            let Some(reference) = node.get("$ref") else {
                return Ok(node);
            };
            let reference = reference
                .as_str()
                .ok_or_else(|| DocumentParseError::invalid_field(location, "$ref", "a string"))?;
            node = reference
                .strip_prefix('#')
                .and_then(|pointer| self.root.pointer(pointer))
                .ok_or_else(|| DocumentParseError::UnresolvedReference {
                    reference: reference.to_string(),
                })?;
        }

        Err(DocumentParseError::UnresolvedReference {
            reference: "reference chain too deep".to_string(),
        })
    }
}

fn method_for_key(key: &str) -> Option<&'static Method> {
    METHOD_KEYS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, method)| method)
}

/// Renders descriptive scalars as text. YAML reads `version: 1.0` as a number.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn optional_string(
    map: &Map<String, Value>,
    field: &str,
    location: &str,
) -> DocumentResult<Option<String>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DocumentParseError::invalid_field(location, field, "a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn customers_document() -> Value {
        json!({
            "openapi": "3.0.3",
            "info": { "title": "Customers", "version": "1.2.0" },
            "paths": {
                "/customers/{id}/stuff": {
                    "parameters": [
                        { "name": "id", "in": "path", "schema": { "type": "integer" } }
                    ],
                    "get": {
                        "operationId": "getCustomerStuff",
                        "summary": "Retrieve a customer",
                        "tags": ["customers"],
                        "parameters": [
                            { "name": "verbose", "in": "query", "schema": { "type": "boolean" } }
                        ]
                    },
                    "delete": {
                        "operationId": "deleteCustomerStuff",
                        "deprecated": true
                    }
                },
                "/health": {
                    "summary": "not an operation",
                    "get": {}
                }
            }
        })
    }

    #[test]
    fn test_projects_paths_in_document_order() {
        let doc = Document::from_value(&customers_document()).unwrap();

        let templates: Vec<_> = doc.paths().map(|(t, _)| t).collect();
        assert_eq!(templates, vec!["/customers/{id}/stuff", "/health"]);
        assert_eq!(doc.path_count(), 2);
        assert_eq!(doc.operation_count(), 3);
        assert_eq!(doc.title(), Some("Customers"));
        assert_eq!(doc.version(), Some("1.2.0"));
    }

    #[test]
    fn test_methods_keep_document_order() {
        let tree = json!({
            "paths": {
                "/orders": {
                    "post": { "operationId": "createOrder" },
                    "x-internal": true,
                    "get": { "operationId": "listOrders" },
                    "delete": {}
                }
            }
        });
        let doc = Document::from_value(&tree).unwrap();
        let methods: Vec<_> = doc.operations("/orders").unwrap().keys().cloned().collect();
        assert_eq!(methods, vec![Method::POST, Method::GET, Method::DELETE]);
    }

    #[test]
    fn test_info_scalars_are_read_as_text() {
        let tree = json!({
            "info": { "title": "Orders", "version": 1.0 },
            "paths": { "/orders": { "get": {} } }
        });
        let doc = Document::from_value(&tree).unwrap();
        assert_eq!(doc.title(), Some("Orders"));
        assert_eq!(doc.version(), Some("1.0"));

        let tree = json!({
            "info": { "title": ["not", "text"], "version": 3 },
            "paths": { "/orders": { "get": {} } }
        });
        let doc = Document::from_value(&tree).unwrap();
        assert_eq!(doc.title(), None);
        assert_eq!(doc.version(), Some("3"));
    }

    #[test]
    fn test_projects_operation_metadata() {
        let doc = Document::from_value(&customers_document()).unwrap();
        let ops = doc.operations("/customers/{id}/stuff").unwrap();

        let get = &ops[&Method::GET];
        assert_eq!(get.operation_id(), Some("getCustomerStuff"));
        assert_eq!(get.summary(), Some("Retrieve a customer"));
        assert_eq!(get.tags, vec!["customers"]);
        assert!(!get.deprecated);

        let delete = &ops[&Method::DELETE];
        assert!(delete.deprecated);
        assert!(delete.summary().is_none());
    }

    #[test]
    fn test_path_level_parameters_are_inherited() {
        let doc = Document::from_value(&customers_document()).unwrap();
        let ops = doc.operations("/customers/{id}/stuff").unwrap();

        let get = &ops[&Method::GET];
        let names: Vec<_> = get.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "verbose"]);

        let id = get.parameter("id", ParamLocation::Path).unwrap();
        assert!(id.required);
        assert_eq!(id.param_type, ParamType::Integer);

        let delete = &ops[&Method::DELETE];
        assert_eq!(delete.parameters.len(), 1);
    }

    #[test]
    fn test_operation_parameter_overrides_path_parameter() {
        let tree = json!({
            "paths": {
                "/items/{id}": {
                    "parameters": [{ "name": "id", "in": "path", "schema": { "type": "string" } }],
                    "get": {
                        "parameters": [{ "name": "id", "in": "path", "schema": { "type": "integer" } }]
                    }
                }
            }
        });
        let doc = Document::from_value(&tree).unwrap();
        let get = &doc.operations("/items/{id}").unwrap()[&Method::GET];
        assert_eq!(get.parameters.len(), 1);
        assert_eq!(get.parameters[0].param_type, ParamType::Integer);
    }

    #[test]
    fn test_swagger2_parameter_type() {
        let tree = json!({
            "swagger": "2.0",
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [{ "name": "limit", "in": "query", "type": "integer", "required": true }]
                    }
                }
            }
        });
        let doc = Document::from_value(&tree).unwrap();
        let get = &doc.operations("/pets").unwrap()[&Method::GET];
        let limit = get.parameter("limit", ParamLocation::Query).unwrap();
        assert_eq!(limit.param_type, ParamType::Integer);
        assert!(limit.required);
    }

    #[test]
    fn test_nullable_type_list() {
        let tree = json!({
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [{ "name": "tag", "in": "query", "schema": { "type": ["null", "string"] } }]
                    }
                }
            }
        });
        let doc = Document::from_value(&tree).unwrap();
        let get = &doc.operations("/pets").unwrap()[&Method::GET];
        assert_eq!(get.parameters[0].param_type, ParamType::String);
    }

    #[test]
    fn test_resolves_local_parameter_refs() {
        let tree = json!({
            "paths": {
                "/orders/{orderId}": {
                    "get": {
                        "parameters": [{ "$ref": "#/components/parameters/OrderId" }]
                    }
                }
            },
            "components": {
                "parameters": {
                    "OrderId": { "name": "orderId", "in": "path", "schema": { "$ref": "#/components/schemas/Id" } }
                },
                "schemas": { "Id": { "type": "integer" } }
            }
        });
        let doc = Document::from_value(&tree).unwrap();
        let get = &doc.operations("/orders/{orderId}").unwrap()[&Method::GET];
        assert_eq!(get.parameters[0].name, "orderId");
        assert_eq!(get.parameters[0].param_type, ParamType::Integer);
    }

    #[test]
    fn test_unresolved_ref_fails() {
        let tree = json!({
            "paths": {
                "/orders": { "get": { "parameters": [{ "$ref": "#/components/parameters/Nope" }] } }
            }
        });
        let err = Document::from_value(&tree).unwrap_err();
        assert!(matches!(err, DocumentParseError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_remote_ref_fails() {
        let tree = json!({
            "paths": {
                "/orders": { "get": { "parameters": [{ "$ref": "common.yaml#/Id" }] } }
            }
        });
        let err = Document::from_value(&tree).unwrap_err();
        assert!(matches!(err, DocumentParseError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_non_string_ref_fails() {
        let tree = json!({
            "paths": {
                "/orders": { "get": { "parameters": [{ "$ref": 42 }] } }
            }
        });
        let err = Document::from_value(&tree).unwrap_err();
        match err {
            DocumentParseError::InvalidField { location, field, .. } => {
                assert_eq!(location, "GET /orders");
                assert_eq!(field, "$ref");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cyclic_ref_fails() {
        let tree = json!({
            "paths": {
                "/orders": { "get": { "parameters": [{ "$ref": "#/components/parameters/A" }] } }
            },
            "components": {
                "parameters": {
                    "A": { "$ref": "#/components/parameters/B" },
                    "B": { "$ref": "#/components/parameters/A" }
                }
            }
        });
        let err = Document::from_value(&tree).unwrap_err();
        assert!(matches!(err, DocumentParseError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_cookie_parameters_are_skipped() {
        let tree = json!({
            "paths": {
                "/session": {
                    "get": { "parameters": [{ "name": "sid", "in": "cookie" }] }
                }
            }
        });
        let doc = Document::from_value(&tree).unwrap();
        assert!(doc.operations("/session").unwrap()[&Method::GET].parameters.is_empty());
    }

    #[test]
    fn test_unknown_parameter_location_fails() {
        let tree = json!({
            "paths": { "/a": { "get": { "parameters": [{ "name": "x", "in": "body" }] } } }
        });
        let err = Document::from_value(&tree).unwrap_err();
        assert!(matches!(err, DocumentParseError::InvalidParameter { .. }));
    }

    #[test]
    fn test_missing_paths_fails() {
        let err = Document::from_value(&json!({ "openapi": "3.0.0" })).unwrap_err();
        assert!(matches!(err, DocumentParseError::MissingPaths));
    }

    #[test]
    fn test_empty_paths_fails() {
        let err = Document::from_value(&json!({ "paths": {} })).unwrap_err();
        assert!(matches!(err, DocumentParseError::EmptyPaths));
    }

    #[test]
    fn test_non_mapping_root_fails() {
        let err = Document::from_value(&json!(["paths"])).unwrap_err();
        assert!(matches!(err, DocumentParseError::NotAMapping { .. }));
    }

    #[test]
    fn test_path_without_methods_fails() {
        let tree = json!({
            "paths": { "/empty": { "summary": "nothing here", "parameters": [] } }
        });
        let err = Document::from_value(&tree).unwrap_err();
        match err {
            DocumentParseError::NoMethods { path } => assert_eq!(path, "/empty"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrongly_typed_summary_fails() {
        let tree = json!({ "paths": { "/a": { "get": { "summary": 42 } } } });
        let err = Document::from_value(&tree).unwrap_err();
        assert!(matches!(err, DocumentParseError::InvalidField { .. }));
    }

    #[test]
    fn test_programmatic_insert() {
        let mut doc = Document::new();
        assert!(doc.is_empty());

        doc.insert(
            "/customers/{id}",
            Method::GET,
            OperationMetadata::new().with_summary("Retrieve a customer"),
        )
        .insert("/customers/{id}", Method::DELETE, OperationMetadata::new());

        assert_eq!(doc.path_count(), 1);
        assert_eq!(doc.operation_count(), 2);
    }
}

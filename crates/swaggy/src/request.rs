//! Request and response descriptors at the router boundary.

use bytes::Bytes;
use http::header::ALLOW;
use http::{HeaderMap, HeaderValue, Method, StatusCode};

/// What the router needs to know about an incoming request.
///
/// The query string is carried but never consulted for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    /// Method token as received, e.g. `GET` or `get`.
    pub method: String,
    /// Raw request path, without the query string.
    pub path: String,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
}

impl RouteRequest {
    /// Creates a request with no query string.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: None,
        }
    }

    /// Creates a request from a request target such as `/items/7?full=1`.
    ///
    /// ```
    /// use swaggy::RouteRequest;
    ///
    /// let request = RouteRequest::from_target("GET", "/items/7?full=1");
    /// assert_eq!(request.path, "/items/7");
    /// assert_eq!(request.query.as_deref(), Some("full=1"));
    /// ```
    pub fn from_target(method: impl Into<String>, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (target, None),
        };
        Self {
            method: method.into(),
            path: path.to_string(),
            query,
        }
    }

    /// Sets the query string.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

impl<B> From<&http::Request<B>> for RouteRequest {
    fn from(request: &http::Request<B>) -> Self {
        let uri = request.uri();
        Self {
            method: request.method().as_str().to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
        }
    }
}

/// The resolved response: status, headers, body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers. Empty unless a policy adds some.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl RouteResponse {
    /// A response with the given status and body and no headers.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// `200 OK` with the given body.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// `404 Not Found`.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found")
    }

    /// `405 Method Not Allowed` with an `Allow` header listing `allowed`.
    pub fn method_not_allowed(allowed: &[Method]) -> Self {
        let mut response = Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
        let list = allowed
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if let Ok(value) = HeaderValue::from_str(&list) {
            response.headers.insert(ALLOW, value);
        }
        response
    }

    /// Adds a header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: http::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body as UTF-8 text, if it is valid UTF-8.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

impl From<RouteResponse> for http::Response<Bytes> {
    fn from(route: RouteResponse) -> Self {
        let mut response = Self::new(route.body);
        *response.status_mut() = route.status;
        *response.headers_mut() = route.headers;
        response
    }
}

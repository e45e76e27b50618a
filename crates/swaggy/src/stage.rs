//! The composition contract for request processing stages.

use std::sync::Arc;

use crate::handle::RouterHandle;
use crate::request::{RouteRequest, RouteResponse};
use crate::router::Router;

/// A synchronous stage that answers a request.
///
/// Both [`Router`] and [`RouterHandle`] implement it, so a host can hold
/// either behind the same interface.
pub trait RequestStage: Send + Sync {
    /// Produces the response for `request`.
    fn call(&self, request: &RouteRequest) -> RouteResponse;

    /// Answers an `http::Request`, ignoring its body.
    fn call_http<B>(&self, request: &http::Request<B>) -> http::Response<bytes::Bytes>
    where
        Self: Sized,
    {
        self.call(&RouteRequest::from(request)).into()
    }
}

impl RequestStage for Router {
    fn call(&self, request: &RouteRequest) -> RouteResponse {
        self.handle(request)
    }
}

impl RequestStage for RouterHandle {
    fn call(&self, request: &RouteRequest) -> RouteResponse {
        self.load().handle(request)
    }
}

impl<T: RequestStage + ?Sized> RequestStage for Arc<T> {
    fn call(&self, request: &RouteRequest) -> RouteResponse {
        (**self).call(request)
    }
}

//! Publishing a router for concurrent use with wholesale replacement.

use std::sync::Arc;

use parking_lot::RwLock;
use swaggy_config::RouterConfig;
use tracing::info;

use crate::error::RouterResult;
use crate::router::Router;

/// Shared, swappable reference to the active [`Router`].
///
/// Readers take a snapshot with [`load`](Self::load) and keep using it even
/// if a swap happens meanwhile. Tables are never mutated in place.
///
/// # Example
///
/// ```
/// use swaggy::{RouteRequest, Router, RouterHandle};
/// use swaggy_document::DocumentFormat;
///
/// let v1 = Router::from_slice(b"paths:\n  /v1:\n    get: {}\n", DocumentFormat::Yaml).unwrap();
/// let v2 = Router::from_slice(b"paths:\n  /v2:\n    get: {}\n", DocumentFormat::Yaml).unwrap();
///
/// let handle = RouterHandle::new(v1);
/// let snapshot = handle.load();
/// handle.swap(v2);
///
/// assert!(snapshot.match_request("GET", "/v1").is_match());
/// assert!(handle.load().match_request("GET", "/v2").is_match());
/// ```
#[derive(Debug, Clone)]
pub struct RouterHandle {
    current: Arc<RwLock<Arc<Router>>>,
}

impl RouterHandle {
    /// Publishes `router` as the active router.
    pub fn new(router: Router) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(router))),
        }
    }

    /// Returns the active router.
    pub fn load(&self) -> Arc<Router> {
        Arc::clone(&self.current.read())
    }

    /// Replaces the active router, returning the previous one.
    pub fn swap(&self, router: Router) -> Arc<Router> {
        let next = Arc::new(router);
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Rebuilds from configuration and swaps only if the build succeeds.
    ///
    /// # Errors
    ///
    /// Returns the build error; the active router is left untouched.
    pub fn reload(&self, config: &RouterConfig) -> RouterResult<Arc<Router>> {
        let router = Router::from_config(config)?;
        let routes = router.table().len();
        let previous = self.swap(router);
        info!(routes, "router reloaded");
        Ok(previous)
    }
}

impl From<Router> for RouterHandle {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}

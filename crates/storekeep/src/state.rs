//! Application state shared by every invocation.
//!
//! Built once in `main` and cloned into each invocation; cloning only bumps
//! the store's reference count.

use std::sync::Arc;

use storekeep_core::envelope::ErrorDetail;
use storekeep_core::storage::ItemStore;

use crate::routing::Route;

#[derive(Clone)]
pub struct AppState {
    /// Item store (DynamoDB or in-memory, by feature).
    pub store: Arc<dyn ItemStore>,
    /// Whether failed responses carry the error source chain.
    pub error_detail: ErrorDetail,
    /// Handler fixed at startup. When `None` each event is routed by method
    /// and path.
    pub route: Option<Route>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>, error_detail: ErrorDetail) -> Self {
        Self {
            store,
            error_detail,
            route: None,
        }
    }

    /// Serve only `route`, whatever the event says.
    pub fn with_route(mut self, route: Option<Route>) -> Self {
        self.route = route;
        self
    }
}

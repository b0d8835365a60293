//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::PostStore;
use crate::service::PostService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Post service for all lifecycle operations.
    pub post_service: Arc<PostService>,
}

impl AppState {
    /// Builds the state over a post store.
    #[must_use]
    pub fn new(store: Arc<dyn PostStore>, expose_store_errors: bool) -> Self {
        Self {
            post_service: Arc::new(PostService::new(store, expose_store_errors)),
        }
    }
}

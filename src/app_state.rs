//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::api::RecordDb;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// User record collection.
    pub db: Arc<RecordDb>,
}

impl AppState {
    /// Creates state over an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

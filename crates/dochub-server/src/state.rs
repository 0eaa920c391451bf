//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use dochub_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Loaded multi-section site.
    pub(crate) site: Arc<Site>,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

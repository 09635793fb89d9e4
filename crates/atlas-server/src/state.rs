//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use atlas_nav::NavigationResolver;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Navigation resolver over the catalog and content source.
    pub(crate) resolver: Arc<NavigationResolver>,
}

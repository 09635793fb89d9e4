//! Catalog listing endpoints.

use std::sync::Arc;

use atlas_catalog::{CategoryEntry, SearchEntry, Subject};
use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// Handle GET /api/catalog.
///
/// Configured subjects merged with categories discovered in the content tree.
pub(crate) async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<Vec<Subject>> {
    Json(state.resolver.merged_catalog().await)
}

/// Handle GET /api/categories.
pub(crate) async fn get_categories(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<CategoryEntry>> {
    Json(state.resolver.all_categories())
}

/// Handle GET /api/search-index.
pub(crate) async fn get_search_index(State(state): State<Arc<AppState>>) -> Json<Vec<SearchEntry>> {
    Json(state.resolver.search_index())
}

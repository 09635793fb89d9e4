//! Breadcrumbs endpoint.

use std::sync::Arc;

use atlas_nav::BreadcrumbItem;
use axum::Json;
use axum::extract::{Path, State};

use crate::state::AppState;

/// Handle GET /api/breadcrumbs/ (root).
pub(crate) async fn get_root_breadcrumbs(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<BreadcrumbItem>> {
    Json(state.resolver.get_breadcrumbs("/"))
}

/// Handle GET /api/breadcrumbs/{path}.
pub(crate) async fn get_breadcrumbs(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<BreadcrumbItem>> {
    Json(state.resolver.get_breadcrumbs(&path))
}

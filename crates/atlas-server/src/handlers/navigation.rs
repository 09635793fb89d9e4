//! Category navigation endpoint.
//!
//! Unknown paths are not an error: they answer with an empty list.

use std::sync::Arc;

use atlas_nav::SharedItems;
use axum::Json;
use axum::extract::{Path, State};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/navigation/ (no category path).
pub(crate) async fn get_navigation_root() -> ServerError {
    ServerError::MissingPath
}

/// Handle GET /api/navigation/{path}.
pub(crate) async fn get_navigation(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<SharedItems> {
    Json(state.resolver.get_category_navigation(&path).await)
}

//! Subject and category lookup endpoints.

use std::sync::Arc;

use atlas_catalog::{Category, Subject};
use axum::Json;
use axum::extract::{Path, State};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/subjects.
pub(crate) async fn list_subjects(State(state): State<Arc<AppState>>) -> Json<Vec<Subject>> {
    Json(state.resolver.list_subjects().to_vec())
}

/// Handle GET /api/subjects/{subject}.
pub(crate) async fn get_subject(
    Path(subject): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Subject>, ServerError> {
    state
        .resolver
        .get_subject(&subject)
        .cloned()
        .map(Json)
        .ok_or(ServerError::SubjectNotFound(subject))
}

/// Handle GET /api/subjects/{subject}/{category}.
pub(crate) async fn get_category(
    Path((subject, category)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Category>, ServerError> {
    if state.resolver.get_subject(&subject).is_none() {
        return Err(ServerError::SubjectNotFound(subject));
    }
    state
        .resolver
        .get_category(&subject, &category)
        .cloned()
        .map(Json)
        .ok_or(ServerError::CategoryNotFound { subject, category })
}

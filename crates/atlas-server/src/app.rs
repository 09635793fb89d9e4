//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let [csp, nosniff, frame_options, referrer] = security::HEADERS.map(security::header_layer);

    Router::new()
        .route("/api/subjects", get(handlers::subjects::list_subjects))
        .route("/api/subjects/{subject}", get(handlers::subjects::get_subject))
        .route(
            "/api/subjects/{subject}/{category}",
            get(handlers::subjects::get_category),
        )
        .route("/api/catalog", get(handlers::catalog::get_catalog))
        .route("/api/categories", get(handlers::catalog::get_categories))
        .route("/api/search-index", get(handlers::catalog::get_search_index))
        .route(
            "/api/navigation",
            get(handlers::navigation::get_navigation_root),
        )
        .route(
            "/api/navigation/",
            get(handlers::navigation::get_navigation_root),
        )
        .route(
            "/api/navigation/{*path}",
            get(handlers::navigation::get_navigation),
        )
        .route(
            "/api/breadcrumbs",
            get(handlers::breadcrumbs::get_root_breadcrumbs),
        )
        .route(
            "/api/breadcrumbs/",
            get(handlers::breadcrumbs::get_root_breadcrumbs),
        )
        .route(
            "/api/breadcrumbs/{*path}",
            get(handlers::breadcrumbs::get_breadcrumbs),
        )
        .layer(
            ServiceBuilder::new()
                .layer(csp)
                .layer(nosniff)
                .layer(frame_options)
                .layer(referrer),
        )
        .with_state(state)
}

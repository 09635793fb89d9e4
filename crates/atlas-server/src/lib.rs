//! HTTP server for the Atlas navigation engine.
//!
//! This crate provides a JSON API using axum, serving:
//! - Subjects and categories from the catalog
//! - Sidebar navigation per category
//! - Breadcrumbs for any path
//! - The merged catalog, a flat category list and a search index
//!
//! # Quick Start
//!
//! ```ignore
//! use atlas_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         port: 8080,
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum router (atlas-server)
//!                        │
//!                        └─► NavigationResolver (atlas-nav)
//!                                │
//!                                ├─► Catalog (atlas-catalog, loaded once)
//!                                ├─► ContentSource (atlas-content-fs / JSON export)
//!                                └─► NavigationCache ◄── background sweeper
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod purge;
mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use atlas_catalog::{Catalog, CatalogError};
use atlas_config::{Config, ContentKind};
use atlas_content::{ContentSource, JsonContentSource};
use atlas_content_fs::{DEFAULT_DIR_META_FILENAME, FsContentSource};
use atlas_nav::{DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_DEPTH, NavigationCache, NavigationResolver};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content backend kind.
    pub content_kind: ContentKind,
    /// Content directory, or JSON export file.
    pub source_dir: PathBuf,
    /// Directory metadata file name (default: "_dir.yml").
    pub dir_meta_filename: String,
    /// Catalog YAML file.
    pub catalog_path: PathBuf,
    /// Enable the navigation cache.
    pub cache_enabled: bool,
    /// Navigation cache entry lifetime.
    pub cache_ttl: Duration,
    /// Bound on each content source call.
    pub fetch_timeout: Duration,
    /// Maximum content nesting below a category.
    pub max_depth: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            content_kind: ContentKind::Fs,
            source_dir: PathBuf::from("content"),
            dir_meta_filename: DEFAULT_DIR_META_FILENAME.to_owned(),
            catalog_path: PathBuf::from("catalog.yaml"),
            cache_enabled: true,
            cache_ttl: Duration::from_secs(300),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Create server configuration from Atlas config.
#[must_use]
pub fn server_config_from_config(config: &Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        content_kind: config.content.kind,
        source_dir: config.content.source_dir.clone(),
        dir_meta_filename: config.content.dir_meta_filename.clone(),
        catalog_path: config.catalog.path.clone(),
        cache_enabled: config.navigation.cache_enabled,
        cache_ttl: config.navigation.cache_ttl(),
        fetch_timeout: config.navigation.fetch_timeout(),
        max_depth: config.navigation.max_depth,
    }
}

/// Load the catalog and wire up the content source and cache.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read or fails validation.
pub fn build_resolver(config: &ServerConfig) -> Result<NavigationResolver, CatalogError> {
    let catalog = Arc::new(Catalog::load(&config.catalog_path)?);

    let source: Arc<dyn ContentSource> = match config.content_kind {
        ContentKind::Fs => Arc::new(
            FsContentSource::new(config.source_dir.clone())
                .with_dir_meta_filename(config.dir_meta_filename.clone()),
        ),
        ContentKind::Json => Arc::new(JsonContentSource::new(config.source_dir.clone())),
    };

    let cache = if config.cache_enabled {
        NavigationCache::new(config.cache_ttl)
    } else {
        NavigationCache::disabled()
    };

    Ok(NavigationResolver::new(catalog, source)
        .with_cache(cache)
        .with_fetch_timeout(config.fetch_timeout)
        .with_max_depth(config.max_depth))
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the catalog is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = Arc::new(build_resolver(&config)?);
    tracing::info!(
        subjects = resolver.list_subjects().len(),
        catalog = %config.catalog_path.display(),
        "Catalog loaded"
    );

    let sweeper = config
        .cache_enabled
        .then(|| purge::spawn_cache_purge(Arc::clone(&resolver), config.cache_ttl));

    let state = Arc::new(AppState { resolver });
    let app = app::create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

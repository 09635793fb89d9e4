//! Navigation resolution for Atlas.
//!
//! Reconciles the hand-authored [`Catalog`](atlas_catalog::Catalog) with the
//! discovered content hierarchy from a
//! [`ContentSource`](atlas_content::ContentSource) and answers three queries:
//!
//! - subjects, straight from the catalog
//! - sidebar navigation for a category, from explicit catalog navigation or
//!   built from content by [`TreeBuilder`]
//! - breadcrumbs for any path
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use atlas_catalog::Catalog;
//! use atlas_content_fs::FsContentSource;
//! use atlas_nav::{NavigationCache, NavigationResolver};
//!
//! let catalog = Arc::new(Catalog::load(Path::new("catalog.yaml"))?);
//! let source = Arc::new(FsContentSource::new("content"));
//! let resolver = NavigationResolver::new(catalog, source)
//!     .with_cache(NavigationCache::new(Duration::from_secs(300)));
//!
//! let items = resolver.get_category_navigation("/physics/mechanics").await;
//! let crumbs = resolver.get_breadcrumbs("/physics/mechanics/kinematics");
//! ```

pub mod cache;
mod item;
mod resolver;
pub mod title;
mod tree;

pub use cache::{NavigationCache, SharedItems};
pub use item::{BreadcrumbItem, NavigationItem, compare_items, compare_titles, sort_items};
pub use resolver::NavigationResolver;
pub use tree::{BuildError, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_DEPTH, TreeBuilder};

//! Navigation resolver: the façade over catalog, content and cache.
//!
//! # Architecture
//!
//! ```text
//! path ─► NavigationCache ─hit──────────────────────────────► Arc<[NavigationItem]>
//!              │ miss
//!              ▼
//!         Catalog::category_by_path ─unknown─► [] (not cached, source untouched)
//!              │ known
//!              ├─ explicit navigation ─► from_nav_item + sort
//!              └─ otherwise ───────────► TreeBuilder::try_build
//!                                            │ degraded ─► [] (not cached)
//!                                            ▼
//!                                       NavigationCache::set
//! ```
//!
//! # Thread Safety
//!
//! `NavigationResolver` is `Send + Sync` and is shared behind an `Arc`. The
//! catalog is immutable; the cache is the only shared mutable state.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use atlas_catalog::{Catalog, Category, CategoryEntry, NavItem, SearchEntry, Subject};
use atlas_content::{ContentNode, ContentSource, path};

use crate::cache::{NavigationCache, SharedItems};
use crate::item::{BreadcrumbItem, NavigationItem, compare_titles, sort_items};
use crate::title::resolve_title;
use crate::tree::TreeBuilder;

/// Answers subject, navigation and breadcrumb queries.
pub struct NavigationResolver {
    catalog: Arc<Catalog>,
    source: Arc<dyn ContentSource>,
    tree: TreeBuilder,
    cache: NavigationCache,
}

impl std::fmt::Debug for NavigationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationResolver")
            .field("subjects", &self.catalog.subjects().len())
            .field("tree", &self.tree)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl NavigationResolver {
    /// Create a resolver with caching disabled.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, source: Arc<dyn ContentSource>) -> Self {
        let tree = TreeBuilder::new(Arc::clone(&source));
        Self {
            catalog,
            source,
            tree,
            cache: NavigationCache::disabled(),
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: NavigationCache) -> Self {
        self.cache = cache;
        self
    }

    /// Bound every content source call.
    #[must_use]
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.tree = self.tree.with_fetch_timeout(fetch_timeout);
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.tree = self.tree.with_max_depth(max_depth);
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn cache(&self) -> &NavigationCache {
        &self.cache
    }

    // ── catalog queries ──

    /// All configured subjects, verbatim.
    #[must_use]
    pub fn list_subjects(&self) -> &[Subject] {
        self.catalog.subjects()
    }

    #[must_use]
    pub fn get_subject(&self, id: &str) -> Option<&Subject> {
        self.catalog.subject(id)
    }

    #[must_use]
    pub fn get_category(&self, subject_id: &str, category_id: &str) -> Option<&Category> {
        self.catalog.category(subject_id, category_id)
    }

    #[must_use]
    pub fn find_by_path(&self, target: &str) -> Option<NavItem> {
        self.catalog.find_by_path(target)
    }

    #[must_use]
    pub fn search_index(&self) -> Vec<SearchEntry> {
        self.catalog.search_index()
    }

    #[must_use]
    pub fn all_categories(&self) -> Vec<CategoryEntry> {
        self.catalog.all_categories()
    }

    // ── navigation ──

    /// Sidebar navigation for a configured category.
    ///
    /// Paths that are not configured categories yield an empty list without
    /// touching the content source. Explicit catalog navigation bypasses the
    /// content source entirely. Content failures degrade to an empty list,
    /// which is not cached so the next request retries.
    pub async fn get_category_navigation(&self, category_path: &str) -> SharedItems {
        let key = path::normalize(category_path);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        let Some((_, category)) = self.catalog.category_by_path(&key) else {
            debug!(path = %key, "Not a configured category");
            return Arc::from(Vec::new());
        };

        let items = if let Some(navigation) = &category.navigation {
            let mut items: Vec<NavigationItem> =
                navigation.iter().map(NavigationItem::from_nav_item).collect();
            sort_items(&mut items);
            items
        } else {
            match self.tree.try_build(&key).await {
                Ok(items) => items,
                Err(e) => {
                    warn!(path = %key, error = %e, "Navigation degraded to empty");
                    return Arc::from(Vec::new());
                }
            }
        };

        let items: SharedItems = Arc::from(items);
        self.cache.set(&key, Arc::clone(&items));
        items
    }

    /// Breadcrumb trail for any path.
    ///
    /// Starts with Home, then names the subject and category segments by
    /// their configured titles, falling back to the raw segment. Deeper
    /// segments are not resolved.
    #[must_use]
    pub fn get_breadcrumbs(&self, current_path: &str) -> Vec<BreadcrumbItem> {
        let mut crumbs = vec![BreadcrumbItem::home()];
        let mut segments = path::segments(current_path);

        let Some(subject_segment) = segments.next() else {
            return crumbs;
        };
        let subject = self.catalog.subject_by_segment(subject_segment);
        let subject_path = path::join(path::ROOT, subject_segment);
        crumbs.push(BreadcrumbItem::new(
            subject.map_or(subject_segment, |s| s.title.as_str()),
            subject_path.clone(),
        ));

        if let Some(category_segment) = segments.next() {
            let category = subject.and_then(|s| s.category_by_segment(category_segment));
            crumbs.push(BreadcrumbItem::new(
                category.map_or(category_segment, |c| c.title.as_str()),
                path::join(&subject_path, category_segment),
            ));
        }

        crumbs
    }

    // ── merged catalog ──

    /// Subjects with configured categories followed by discovered ones.
    ///
    /// A directory under a subject's content node that no configured category
    /// claims becomes a category of its own. If the content tree is
    /// unavailable the configured catalog is returned unchanged.
    pub async fn merged_catalog(&self) -> Vec<Subject> {
        let tree = self.fetch_tree().await;

        let merged = self.catalog.subjects().iter().map(|subject| {
            let node = tree.as_ref().and_then(|tree| tree.find(&subject.path));
            async move {
                let mut merged = subject.clone();
                if let Some(node) = node {
                    merged.categories.extend(self.discover_categories(subject, node).await);
                }
                merged
            }
        });
        join_all(merged).await
    }

    async fn fetch_tree(&self) -> Option<ContentNode> {
        let timeout = self.tree.fetch_timeout();
        match tokio::time::timeout(timeout, self.source.fetch_tree()).await {
            Ok(Ok(tree)) => Some(tree),
            Ok(Err(e)) => {
                warn!(error = %e, "Content tree unavailable, serving configured catalog");
                None
            }
            Err(_) => {
                warn!(timeout = ?timeout, "Content tree fetch timed out, serving configured catalog");
                None
            }
        }
    }

    async fn discover_categories(&self, subject: &Subject, node: &ContentNode) -> Vec<Category> {
        let unclaimed: Vec<&ContentNode> = node
            .children
            .iter()
            .filter(|child| child.is_directory())
            .filter(|child| {
                subject.category_by_segment(child.name()).is_none()
                    && !subject.categories.iter().any(|c| c.path == child.path)
            })
            .collect();

        let metadata = join_all(
            unclaimed
                .iter()
                .map(|child| self.tree.dir_metadata(&child.path)),
        )
        .await;

        let mut discovered: Vec<Category> = unclaimed
            .into_iter()
            .zip(metadata)
            .map(|(child, metadata)| Category {
                id: child.name().to_owned(),
                title: resolve_title(
                    child.name(),
                    child.title.as_deref(),
                    metadata.title.as_deref(),
                ),
                description: child.description.clone().or(metadata.description),
                icon: metadata
                    .icon
                    .unwrap_or_else(|| self.catalog.default_icon().to_owned()),
                path: child.path.clone(),
                navigation: None,
            })
            .collect();
        discovered.sort_by(|a, b| compare_titles(&a.title, &b.title));

        if !discovered.is_empty() {
            debug!(subject = %subject.id, count = discovered.len(), "Discovered categories");
        }
        discovered
    }
}

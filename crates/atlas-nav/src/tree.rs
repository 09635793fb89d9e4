//! Navigation tree building from the content hierarchy.
//!
//! [`TreeBuilder`] walks the [`ContentNode`] subtree beneath a root path and
//! turns it into sorted [`NavigationItem`]s. Sibling subtrees are built
//! concurrently; the final order comes from the sort, never from completion
//! order.
//!
//! Every call into the content source is bounded by a timeout. A failed or
//! slow source, an over-deep tree, or a node repeating an ancestor's path
//! aborts the build, and [`TreeBuilder::build`] turns that into an empty list.
//! Repeated sibling paths are not fatal: the first one wins.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, join_all};
use tracing::{debug, warn};

use atlas_content::{ContentError, ContentNode, ContentSource, DirMetadata, path};

use crate::item::{NavigationItem, sort_items};
use crate::title::resolve_title;

/// Default bound on a single content source call.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Default maximum nesting below the root.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Reason a build was abandoned.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The content source returned an error.
    #[error(transparent)]
    Source(#[from] ContentError),
    /// The content source did not answer in time.
    #[error("Content source timed out after {timeout:?} (path: {path})")]
    Timeout { path: String, timeout: Duration },
    /// The tree nests deeper than allowed.
    #[error("Content tree exceeds maximum depth {max_depth} (path: {path})")]
    DepthExceeded { path: String, max_depth: usize },
    /// A node repeats the path of one of its ancestors.
    #[error("Content tree contains a cycle (path: {path})")]
    Cycle { path: String },
}

/// Builds sorted navigation trees from a [`ContentSource`].
#[derive(Clone)]
pub struct TreeBuilder {
    source: Arc<dyn ContentSource>,
    fetch_timeout: Duration,
    max_depth: usize,
}

impl std::fmt::Debug for TreeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBuilder")
            .field("fetch_timeout", &self.fetch_timeout)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl TreeBuilder {
    /// Create a builder with default timeout and depth limit.
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build navigation beneath `root_path`, degrading failures to an empty list.
    pub async fn build(&self, root_path: &str) -> Vec<NavigationItem> {
        match self.try_build(root_path).await {
            Ok(items) => items,
            Err(e) => {
                warn!(path = %path::normalize(root_path), error = %e, "Navigation degraded to empty");
                Vec::new()
            }
        }
    }

    /// Build navigation beneath `root_path`.
    ///
    /// A root the source does not know yields `Ok` with an empty list; only
    /// source failures and guard violations are errors.
    pub async fn try_build(&self, root_path: &str) -> Result<Vec<NavigationItem>, BuildError> {
        let root_path = path::normalize(root_path);
        let Some(root) = self.fetch_node(&root_path).await? else {
            debug!(path = %root_path, "No content at navigation root");
            return Ok(Vec::new());
        };

        let lineage = [root.path];
        self.build_children(root.children, 1, &lineage).await
    }

    /// Directory metadata for `dir`, empty when unavailable.
    ///
    /// Lookup failures only cost the metadata rung of the title chain, so
    /// they are logged and swallowed.
    pub(crate) async fn dir_metadata(&self, dir: &str) -> DirMetadata {
        match tokio::time::timeout(self.fetch_timeout, self.source.dir_metadata(dir)).await {
            Ok(Ok(metadata)) => metadata.unwrap_or_default(),
            Ok(Err(e)) => {
                debug!(path = dir, error = %e, "Directory metadata unavailable");
                DirMetadata::default()
            }
            Err(_) => {
                debug!(path = dir, timeout = ?self.fetch_timeout, "Directory metadata lookup timed out");
                DirMetadata::default()
            }
        }
    }

    async fn fetch_node(&self, node_path: &str) -> Result<Option<ContentNode>, BuildError> {
        tokio::time::timeout(self.fetch_timeout, self.source.fetch_node(node_path))
            .await
            .map_err(|_| BuildError::Timeout {
                path: node_path.to_owned(),
                timeout: self.fetch_timeout,
            })?
            .map_err(BuildError::Source)
    }

    /// Build and sort one level. Boxed to allow recursion through `build_node`.
    ///
    /// `lineage` holds the paths from the root down to the parent.
    fn build_children<'a>(
        &'a self,
        children: Vec<ContentNode>,
        depth: usize,
        lineage: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<NavigationItem>, BuildError>> {
        async move {
            let mut seen = HashSet::with_capacity(children.len());
            let children = children.into_iter().filter(|child| {
                let first = seen.insert(child.path.clone());
                if !first {
                    debug!(path = %child.path, "Skipping repeated sibling path");
                }
                first
            });
            let built = join_all(children.map(|child| self.build_node(child, depth, lineage))).await;

            let mut items = Vec::with_capacity(built.len());
            for item in built {
                items.extend(item?);
            }
            sort_items(&mut items);
            Ok(items)
        }
        .boxed()
    }

    async fn build_node(
        &self,
        node: ContentNode,
        depth: usize,
        lineage: &[String],
    ) -> Result<Option<NavigationItem>, BuildError> {
        if depth > self.max_depth {
            return Err(BuildError::DepthExceeded {
                path: node.path,
                max_depth: self.max_depth,
            });
        }
        if lineage.contains(&node.path) {
            return Err(BuildError::Cycle { path: node.path });
        }

        let is_directory = node.is_directory();
        if !is_directory && is_index_name(node.name()) {
            return Ok(None);
        }

        let metadata = if is_directory {
            self.dir_metadata(&node.path).await
        } else {
            DirMetadata::default()
        };
        let title = resolve_title(
            node.name(),
            node.title.as_deref(),
            metadata.title.as_deref(),
        );

        let ContentNode {
            path,
            description,
            order,
            difficulty,
            children,
            ..
        } = node;
        let children = if is_directory {
            let lineage = [lineage, std::slice::from_ref(&path)].concat();
            self.build_children(children, depth + 1, &lineage).await?
        } else {
            Vec::new()
        };

        Ok(Some(NavigationItem {
            title,
            path,
            is_directory,
            children: (!children.is_empty()).then_some(children),
            description: description.or(metadata.description),
            icon: metadata.icon,
            difficulty,
            order: order.or(metadata.order).unwrap_or(0),
        }))
    }
}

/// Whether a leaf name marks a directory landing page.
fn is_index_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("index") || name.eq_ignore_ascii_case("index.md")
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use atlas_content::{ContentErrorKind, Difficulty, MockContentSource};
    use pretty_assertions::assert_eq;

    use super::*;

    fn mechanics() -> ContentNode {
        ContentNode::new("/").with_child(
            ContentNode::new("/physics").with_child(
                ContentNode::new("/physics/mechanics")
                    .with_child(ContentNode::new("/physics/mechanics/index"))
                    .with_child(
                        ContentNode::new("/physics/mechanics/02-kinematics")
                            .with_title("Kinematics")
                            .with_difficulty(Difficulty::Beginner),
                    )
                    .with_child(ContentNode::new("/physics/mechanics/01-newton-laws"))
                    .with_child(
                        ContentNode::new("/physics/mechanics/dynamics")
                            .with_child(ContentNode::new("/physics/mechanics/dynamics/momentum")),
                    )
                    .with_child(
                        ContentNode::new("/physics/mechanics/landing")
                            .with_child(ContentNode::new("/physics/mechanics/landing/index.md")),
                    ),
            ),
        )
    }

    fn builder(source: MockContentSource) -> (Arc<MockContentSource>, TreeBuilder) {
        let source = Arc::new(source);
        let builder = TreeBuilder::new(Arc::clone(&source) as Arc<dyn ContentSource>);
        (source, builder)
    }

    fn titles(items: &[NavigationItem]) -> Vec<&str> {
        items.iter().map(|item| item.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_build_sorted_tree() {
        let (_, builder) = builder(MockContentSource::new().with_tree(mechanics()));

        let items = builder.build("/physics/mechanics").await;

        assert_eq!(titles(&items), vec!["dynamics", "landing", "Kinematics", "newton laws"]);
        let dynamics = &items[0];
        assert!(dynamics.is_directory);
        assert_eq!(titles(dynamics.children()), vec!["momentum"]);
        assert_eq!(items[2].difficulty, Some(Difficulty::Beginner));
        assert_eq!(items[2].children, None);
    }

    #[tokio::test]
    async fn test_index_only_directory_has_no_children() {
        let (_, builder) = builder(MockContentSource::new().with_tree(mechanics()));

        let items = builder.build("/physics/mechanics").await;

        let landing = items.iter().find(|item| item.title == "landing").unwrap();
        assert!(landing.is_directory);
        assert_eq!(landing.children, None);
        assert!(items.iter().all(|item| item.path != "/physics/mechanics/index"));
    }

    #[tokio::test]
    async fn test_dir_metadata_fills_title_and_order() {
        let source = MockContentSource::new().with_tree(mechanics()).with_dir_metadata(
            "/physics/mechanics/dynamics",
            DirMetadata {
                title: Some("动力学".to_owned()),
                description: Some("Forces".to_owned()),
                icon: Some("i-arrow".to_owned()),
                order: Some(-5),
            },
        );
        let (source, builder) = builder(source);

        let items = builder.build("/physics/mechanics").await;

        let dynamics = &items[0];
        assert_eq!(dynamics.title, "动力学");
        assert_eq!(dynamics.order, -5);
        assert_eq!(dynamics.description.as_deref(), Some("Forces"));
        assert_eq!(dynamics.icon.as_deref(), Some("i-arrow"));
        // Only directories consult metadata.
        assert_eq!(source.metadata_fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_explicit_node_metadata_beats_dir_metadata() {
        let tree = ContentNode::new("/").with_child(
            ContentNode::new("/physics").with_child(
                ContentNode::new("/physics/waves")
                    .with_title("Waves")
                    .with_order(3)
                    .with_child(ContentNode::new("/physics/waves/sound")),
            ),
        );
        let source = MockContentSource::new().with_tree(tree).with_dir_metadata(
            "/physics/waves",
            DirMetadata {
                title: Some("波".to_owned()),
                order: Some(9),
                ..DirMetadata::default()
            },
        );
        let (_, builder) = builder(source);

        let items = builder.build("/physics").await;

        assert_eq!(items[0].title, "Waves");
        assert_eq!(items[0].order, 3);
    }

    #[tokio::test]
    async fn test_unknown_root_is_empty_not_error() {
        let (_, builder) = builder(MockContentSource::new().with_tree(mechanics()));

        assert_eq!(builder.try_build("/chemistry").await.unwrap(), Vec::new());
    }

    #[tokio::test]
    async fn test_root_without_children() {
        let tree = ContentNode::new("/").with_child(ContentNode::new("/notes"));
        let (_, builder) = builder(MockContentSource::new().with_tree(tree));

        assert!(builder.try_build("/notes").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_source_failure_degrades() {
        let source = MockContentSource::new()
            .with_tree(mechanics())
            .with_failure(ContentErrorKind::Unavailable);
        let (_, builder) = builder(source);

        let err = builder.try_build("/physics/mechanics").await.unwrap_err();
        assert!(matches!(err, BuildError::Source(ref e) if e.kind() == ContentErrorKind::Unavailable));
        assert!(builder.build("/physics/mechanics").await.is_empty());
    }

    #[tokio::test]
    async fn test_slow_source_times_out() {
        let source = MockContentSource::new()
            .with_tree(mechanics())
            .with_delay(Duration::from_millis(200));
        let (_, builder) = builder(source);
        let builder = builder.with_fetch_timeout(Duration::from_millis(10));

        let started = Instant::now();
        let err = builder.try_build("/physics/mechanics").await.unwrap_err();

        assert!(matches!(err, BuildError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_depth_guard() {
        let mut node = ContentNode::new("/a/b/c/d/e");
        for parent in ["/a/b/c/d", "/a/b/c", "/a/b", "/a", "/"] {
            node = ContentNode::new(parent).with_child(node);
        }
        let (_, builder) = builder(MockContentSource::new().with_tree(node));

        let err = builder
            .with_max_depth(3)
            .try_build("/a")
            .await
            .unwrap_err();

        assert!(matches!(err, BuildError::DepthExceeded { max_depth: 3, .. }));
    }

    #[tokio::test]
    async fn test_node_repeating_ancestor_is_cycle() {
        let tree = ContentNode::new("/").with_child(
            ContentNode::new("/loop").with_child(
                ContentNode::new("/loop/a").with_child(ContentNode::new("/loop")),
            ),
        );
        let (_, builder) = builder(MockContentSource::new().with_tree(tree));

        let err = builder.try_build("/loop").await.unwrap_err();

        assert!(matches!(err, BuildError::Cycle { ref path } if path == "/loop"));
        assert!(builder.build("/loop").await.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_paths_outside_lineage_still_build() {
        let tree = ContentNode::new("/").with_child(
            ContentNode::new("/physics/mechanics")
                .with_child(ContentNode::new("/physics/mechanics/dynamics"))
                .with_child(
                    ContentNode::new("/physics/mechanics/kinematics")
                        .with_title("Kinematics")
                        .with_child(ContentNode::new("/physics/mechanics/kinematics/two-dim")),
                )
                .with_child(ContentNode::new("/physics/mechanics/kinematics").with_title("Duplicate"))
                .with_child(
                    ContentNode::new("/physics/mechanics/waves")
                        .with_child(ContentNode::new("/physics/mechanics/dynamics")),
                ),
        );
        let (_, builder) = builder(MockContentSource::new().with_tree(tree));

        let items = builder.try_build("/physics/mechanics").await.unwrap();

        assert_eq!(titles(&items), vec!["Kinematics", "waves", "dynamics"]);
        assert_eq!(titles(items[0].children()), vec!["two dim"]);
        assert_eq!(titles(items[1].children()), vec!["dynamics"]);
    }

    #[tokio::test]
    async fn test_page_beside_same_named_directory_on_disk() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mechanics = temp_dir.path().join("physics").join("mechanics");
        std::fs::create_dir_all(mechanics.join("kinematics")).unwrap();
        std::fs::write(mechanics.join("kinematics.md"), "---\ntitle: 运动学\n---\n").unwrap();
        std::fs::write(mechanics.join("kinematics").join("two-dim.md"), "").unwrap();
        std::fs::write(mechanics.join("dynamics.md"), "").unwrap();
        let builder = TreeBuilder::new(Arc::new(atlas_content_fs::FsContentSource::new(
            temp_dir.path(),
        )));

        let items = builder.try_build("/physics/mechanics").await.unwrap();

        assert_eq!(titles(&items), vec!["运动学", "dynamics"]);
        assert_eq!(items[0].path, "/physics/mechanics/kinematics");
        assert_eq!(titles(items[0].children()), vec!["two dim"]);
    }

    /// Serves a tree but fails every metadata lookup.
    struct BrokenMetadata(ContentNode);

    #[async_trait::async_trait]
    impl ContentSource for BrokenMetadata {
        async fn fetch_tree(&self) -> Result<ContentNode, ContentError> {
            Ok(self.0.clone())
        }

        async fn dir_metadata(&self, _dir: &str) -> Result<Option<DirMetadata>, ContentError> {
            Err(ContentError::new(ContentErrorKind::InvalidData))
        }
    }

    #[tokio::test]
    async fn test_failed_metadata_keeps_build() {
        let builder = TreeBuilder::new(Arc::new(BrokenMetadata(mechanics())));

        let items = builder.try_build("/physics/mechanics").await.unwrap();

        assert_eq!(titles(&items), vec!["dynamics", "landing", "Kinematics", "newton laws"]);
    }

    #[test]
    fn test_is_index_name() {
        assert!(is_index_name("index"));
        assert!(is_index_name("index.md"));
        assert!(is_index_name("INDEX.md"));
        assert!(!is_index_name("indexing"));
    }
}

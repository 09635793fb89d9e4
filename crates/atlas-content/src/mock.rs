//! Mock content source for testing.
//!
//! Provides [`MockContentSource`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::node::{ContentNode, DirMetadata};
use crate::path;
use crate::source::{ContentError, ContentErrorKind, ContentSource};

/// Mock content source for testing.
///
/// Holds a content tree in memory and counts calls so tests can assert
/// whether (and how often) the navigation engine touched the source.
///
/// # Example
///
/// ```ignore
/// use atlas_content::{ContentNode, MockContentSource};
///
/// let source = MockContentSource::new().with_tree(
///     ContentNode::new("/").with_child(ContentNode::new("/physics")),
/// );
/// let tree = source.fetch_tree().await.unwrap();
/// assert_eq!(source.fetch_count(), 1);
/// ```
#[derive(Debug)]
pub struct MockContentSource {
    tree: RwLock<ContentNode>,
    dir_metadata: RwLock<HashMap<String, DirMetadata>>,
    failure: RwLock<Option<ContentErrorKind>>,
    delay: RwLock<Option<Duration>>,
    fetches: AtomicUsize,
    metadata_fetches: AtomicUsize,
}

impl Default for MockContentSource {
    fn default() -> Self {
        Self {
            tree: RwLock::new(ContentNode::new(path::ROOT)),
            dir_metadata: RwLock::new(HashMap::new()),
            failure: RwLock::new(None),
            delay: RwLock::new(None),
            fetches: AtomicUsize::new(0),
            metadata_fetches: AtomicUsize::new(0),
        }
    }
}

impl MockContentSource {
    /// Create a mock with an empty root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content tree.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_tree(self, tree: ContentNode) -> Self {
        *self.tree.write().unwrap() = tree;
        self
    }

    /// Register directory metadata for a path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_dir_metadata(self, dir: &str, metadata: DirMetadata) -> Self {
        self.dir_metadata
            .write()
            .unwrap()
            .insert(path::normalize(dir), metadata);
        self
    }

    /// Make every fetch fail with the given error kind.
    #[must_use]
    pub fn with_failure(self, kind: ContentErrorKind) -> Self {
        self.set_failure(Some(kind));
        self
    }

    /// Delay every call by `delay` before answering.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.write().unwrap() = Some(delay);
        self
    }

    /// Set or clear the injected failure.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_failure(&self, kind: Option<ContentErrorKind>) {
        *self.failure.write().unwrap() = kind;
    }

    /// Number of tree fetches served (including failed ones).
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of directory metadata lookups served.
    #[must_use]
    pub fn metadata_fetch_count(&self) -> usize {
        self.metadata_fetches.load(Ordering::SeqCst)
    }

    /// Sleep for the configured delay, then report the injected failure.
    async fn simulate(&self) -> Result<(), ContentError> {
        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let failure = *self.failure.read().unwrap();
        match failure {
            Some(kind) => Err(ContentError::new(kind).with_backend("Mock")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    async fn fetch_tree(&self) -> Result<ContentNode, ContentError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        Ok(self.tree.read().unwrap().clone())
    }

    async fn dir_metadata(&self, dir: &str) -> Result<Option<DirMetadata>, ContentError> {
        self.metadata_fetches.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        Ok(self
            .dir_metadata
            .read()
            .unwrap()
            .get(&path::normalize(dir))
            .cloned())
    }
}

//! Filesystem content source for the Atlas navigation engine.
//!
//! This crate provides [`FsContentSource`], a filesystem-based implementation
//! of the [`ContentSource`] trait. It handles:
//!
//! - Recursive directory walking for markdown files
//! - YAML front matter extraction with mtime caching
//! - Directory metadata from sidecar files (`_dir.yml` by default)
//!
//! # Example
//!
//! ```ignore
//! use atlas_content::ContentSource;
//! use atlas_content_fs::FsContentSource;
//!
//! let source = FsContentSource::new("content");
//! let tree = source.fetch_tree().await?;
//! for subject in &tree.children {
//!     println!("{}", subject.path);
//! }
//! ```

mod front_matter;
mod scanner;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use async_trait::async_trait;

use atlas_content::{
    ContentError, ContentErrorKind, ContentNode, ContentSource, DirMetadata, path,
};
use front_matter::{FrontMatter, parse_dir_metadata, parse_front_matter};
use scanner::{EntryRef, Scanner};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default directory metadata filename.
pub const DEFAULT_DIR_META_FILENAME: &str = "_dir.yml";

/// Cached front matter for a single file.
#[derive(Clone, Debug)]
struct CachedFile {
    /// File modification time.
    mtime: SystemTime,
    /// Front matter parsed at that mtime.
    front_matter: FrontMatter,
}

/// Front matter cache keyed by file path and invalidated by mtime.
#[derive(Debug, Default)]
struct FrontMatterCache {
    files: Mutex<HashMap<PathBuf, CachedFile>>,
}

impl FrontMatterCache {
    /// Read front matter for a file, reusing the cached value if unchanged.
    ///
    /// Unreadable files and malformed front matter yield empty front matter so
    /// a single bad page does not hide its siblings.
    fn read(&self, file: &Path) -> FrontMatter {
        let mtime = fs::metadata(file).ok().and_then(|m| m.modified().ok());

        // Check cache (lock released at end of block)
        if let Some(mtime) = mtime {
            let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = files.get(file).filter(|c| c.mtime == mtime) {
                return cached.front_matter.clone();
            }
        }

        let front_matter = match fs::read_to_string(file) {
            Ok(content) => parse_front_matter(&content).unwrap_or_else(|e| {
                tracing::debug!(path = %file.display(), error = %e, "Ignoring malformed front matter");
                FrontMatter::default()
            }),
            Err(e) => {
                tracing::debug!(path = %file.display(), error = %e, "Failed to read page");
                FrontMatter::default()
            }
        };

        if let Some(mtime) = mtime {
            self.files
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(
                    file.to_path_buf(),
                    CachedFile {
                        mtime,
                        front_matter: front_matter.clone(),
                    },
                );
        }

        front_matter
    }

    fn len(&self) -> usize {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Convert a scanned entry into a [`ContentNode`].
    ///
    /// A directory takes its front matter from its `index.md`, which stays
    /// in the children as well, or else from a same-named page beside it.
    fn build_node(&self, entry: EntryRef) -> ContentNode {
        let (url_path, front_matter, children) = match entry {
            EntryRef::Page { url_path, file } => (url_path, self.read(&file), Vec::new()),
            EntryRef::Dir(dir) => {
                let front_matter = dir
                    .index
                    .as_deref()
                    .map(|index| self.read(index))
                    .unwrap_or_default();
                let children = dir
                    .entries
                    .into_iter()
                    .map(|child| self.build_node(child))
                    .collect();
                (dir.url_path, front_matter, children)
            }
        };

        ContentNode {
            path: url_path,
            title: front_matter.title,
            description: front_matter.description,
            order: front_matter.order,
            difficulty: front_matter.difficulty,
            children,
        }
    }
}

/// Filesystem content source.
///
/// Walks a source directory for markdown files on every fetch. Directory and
/// file names become URL path segments with `.md` stripped from files, so
/// `physics/mechanics/index.md` is served as `/physics/mechanics/index`.
/// `guide.md` next to a `guide/` directory is folded into that directory.
/// Front matter is cached per file and re-read only when the mtime changes.
/// The walk runs on the blocking thread pool.
///
/// # Example
///
/// ```ignore
/// use atlas_content_fs::FsContentSource;
///
/// let source = FsContentSource::new("content").with_dir_meta_filename("meta.yml");
/// ```
#[derive(Debug, Clone)]
pub struct FsContentSource {
    /// Scanner for content discovery.
    scanner: Scanner,
    /// Root directory for content.
    source_dir: PathBuf,
    /// Directory metadata file name (e.g., "_dir.yml").
    dir_meta_filename: String,
    /// Mtime cache shared with blocking scan tasks.
    front_matter: Arc<FrontMatterCache>,
}

impl FsContentSource {
    /// Create a new filesystem content source.
    ///
    /// Uses `_dir.yml` as the directory metadata filename.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        Self {
            scanner: Scanner::new(source_dir.clone()),
            source_dir,
            dir_meta_filename: DEFAULT_DIR_META_FILENAME.to_owned(),
            front_matter: Arc::new(FrontMatterCache::default()),
        }
    }

    /// Use a different directory metadata filename.
    #[must_use]
    pub fn with_dir_meta_filename(mut self, filename: impl Into<String>) -> Self {
        self.dir_meta_filename = filename.into();
        self
    }

    /// Root directory being served.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Number of files with cached front matter.
    #[must_use]
    pub fn cached_files(&self) -> usize {
        self.front_matter.len()
    }

    /// Scan the entry at `url_path` on the blocking pool and build its node.
    async fn load(&self, url_path: &str) -> Result<Option<ContentNode>, ContentError> {
        let scanner = self.scanner.clone();
        let cache = Arc::clone(&self.front_matter);
        let target = url_path.to_owned();

        let scanned = tokio::task::spawn_blocking(move || {
            scanner
                .scan(&target)
                .map(|entry| entry.map(|e| cache.build_node(e)))
        })
        .await
        .map_err(|e| {
            ContentError::new(ContentErrorKind::Other)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        scanned.map_err(|e| {
            ContentError::io(e, Some(self.source_dir.display().to_string())).with_backend(BACKEND)
        })
    }
}

#[async_trait]
impl ContentSource for FsContentSource {
    async fn fetch_tree(&self) -> Result<ContentNode, ContentError> {
        self.load(path::ROOT).await?.ok_or_else(|| {
            ContentError::new(ContentErrorKind::NotFound)
                .with_path(self.source_dir.display().to_string())
                .with_backend(BACKEND)
        })
    }

    async fn fetch_node(&self, url_path: &str) -> Result<Option<ContentNode>, ContentError> {
        self.load(url_path).await
    }

    async fn dir_metadata(&self, dir: &str) -> Result<Option<DirMetadata>, ContentError> {
        let normalized = path::normalize(dir);
        let Some(dir_path) = self.scanner.fs_path(&normalized) else {
            return Err(ContentError::new(ContentErrorKind::NotFound)
                .with_path(normalized)
                .with_backend(BACKEND));
        };
        let meta_path = dir_path.join(&self.dir_meta_filename);

        let content = match tokio::fs::read_to_string(&meta_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ContentError::io(e, Some(normalized)).with_backend(BACKEND)),
        };

        parse_dir_metadata(&content).map_err(|e| {
            ContentError::invalid_data(format!("malformed directory metadata: {e}"))
                .with_path(normalized)
                .with_backend(BACKEND)
        })
    }
}

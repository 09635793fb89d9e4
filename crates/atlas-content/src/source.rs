//! Content source trait and error types.
//!
//! Provides the core [`ContentSource`] trait for abstracting access to the
//! discovered content hierarchy, along with [`ContentError`] for unified error
//! handling across backends.
//!
//! # Path Convention
//!
//! All path parameters are **URL paths** in the form described in
//! [`crate::path`]. Implementations handle the mapping from URL paths to their
//! internal storage format (files, rows, remote documents).

use async_trait::async_trait;

use crate::node::{ContentNode, DirMetadata};
use crate::path;

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Backend returned data that does not fit the [`ContentNode`] contract.
    InvalidData,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Operation timed out.
    Timeout,
    /// Other/unknown error category.
    Other,
}

/// Content error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct ContentError {
    kind: ContentErrorKind,
    path: Option<String>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ContentError {
    /// Create a new content error.
    #[must_use]
    pub fn new(kind: ContentErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Create an invalid data error with a message.
    #[must_use]
    pub fn invalid_data(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::new(ContentErrorKind::InvalidData).with_source(message)
    }

    /// Create a content error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ContentErrorKind::NotFound,
            std::io::ErrorKind::TimedOut => ContentErrorKind::Timeout,
            std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::ConnectionRefused => {
                ContentErrorKind::Unavailable
            }
            std::io::ErrorKind::InvalidData => ContentErrorKind::InvalidData,
            _ => ContentErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> ContentErrorKind {
        self.kind
    }

    /// Path context, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Backend identifier, if any.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            ContentErrorKind::NotFound => "Not found",
            ContentErrorKind::InvalidData => "Invalid data",
            ContentErrorKind::Unavailable => "Unavailable",
            ContentErrorKind::Timeout => "Timeout",
            ContentErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {path})")?;
        }

        Ok(())
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read-only access to the discovered content hierarchy.
///
/// Implementations may be slow or remote; callers are expected to bound every
/// call with a timeout. The navigation engine never writes through this trait.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the whole content tree, rooted at `"/"`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the backend cannot be read or returns data
    /// that does not fit the [`ContentNode`] contract.
    async fn fetch_tree(&self) -> Result<ContentNode, ContentError>;

    /// Fetch the subtree rooted at `path`.
    ///
    /// Returns `Ok(None)` when no node exists at the path. The default
    /// implementation fetches the whole tree and extracts the subtree;
    /// backends with a cheaper point lookup should override it.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the backend fails.
    async fn fetch_node(&self, path: &str) -> Result<Option<ContentNode>, ContentError> {
        let tree = self.fetch_tree().await?;
        Ok(tree.into_subtree(&path::normalize(path)))
    }

    /// Read directory-level metadata for a directory path.
    ///
    /// Default implementation returns `Ok(None)` for backends without
    /// directory metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the metadata exists but cannot be read or parsed.
    async fn dir_metadata(&self, _path: &str) -> Result<Option<DirMetadata>, ContentError> {
        Ok(None)
    }
}

//! JSON-exported content trees.
//!
//! Some deployments produce the content hierarchy ahead of time (for example a
//! content database dump). [`JsonContentSource`] reads such an export and
//! coerces it into [`ContentNode`] on every fetch.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::node::ContentNode;
use crate::source::{ContentError, ContentSource};

/// Backend identifier for error messages.
const BACKEND: &str = "Json";

/// Content source backed by a JSON file.
///
/// The file holds either a root node object or an array of top-level nodes.
/// The file is re-read on every fetch; callers cache at the navigation layer.
#[derive(Debug, Clone)]
pub struct JsonContentSource {
    file: PathBuf,
}

impl JsonContentSource {
    /// Create a source reading from `file`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }
}

#[async_trait]
impl ContentSource for JsonContentSource {
    async fn fetch_tree(&self) -> Result<ContentNode, ContentError> {
        let display = self.file.display().to_string();
        let content = tokio::fs::read_to_string(&self.file)
            .await
            .map_err(|e| ContentError::io(e, Some(display.clone())).with_backend(BACKEND))?;

        let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            ContentError::invalid_data(format!("malformed JSON: {e}"))
                .with_path(display.clone())
                .with_backend(BACKEND)
        })?;

        ContentNode::from_value(&value).map_err(|e| e.with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContentErrorKind;

    #[tokio::test]
    async fn test_fetch_tree_from_array() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("content.json");
        std::fs::write(
            &file,
            r#"[{"path": "/physics", "children": [{"path": "/physics/mechanics", "title": "Mechanics"}]}]"#,
        )
        .unwrap();

        let source = JsonContentSource::new(&file);
        let tree = source.fetch_tree().await.unwrap();

        assert_eq!(tree.path, "/");
        let mechanics = tree.find("/physics/mechanics").unwrap();
        assert_eq!(mechanics.title.as_deref(), Some("Mechanics"));
    }

    #[tokio::test]
    async fn test_fetch_node_uses_default_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("content.json");
        std::fs::write(
            &file,
            r#"{"path": "/", "children": [{"path": "/physics"}]}"#,
        )
        .unwrap();

        let source = JsonContentSource::new(&file);

        assert!(source.fetch_node("/physics").await.unwrap().is_some());
        assert!(source.fetch_node("/biology").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let source = JsonContentSource::new("/nonexistent/content.json");

        let err = source.fetch_tree().await.unwrap_err();

        assert_eq!(err.kind(), ContentErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Json"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("content.json");
        std::fs::write(&file, "{not json").unwrap();

        let err = JsonContentSource::new(&file).fetch_tree().await.unwrap_err();

        assert_eq!(err.kind(), ContentErrorKind::InvalidData);
        assert!(err.to_string().starts_with("[Json] Invalid data: malformed JSON"));
    }
}

//! Content node types.
//!
//! [`ContentNode`] is the single typed contract between content backends and
//! the navigation engine. Backends that deal in untyped data (JSON exports,
//! remote APIs) coerce into it immediately on fetch via
//! [`ContentNode::from_value`], so nothing downstream handles loose data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path;
use crate::source::ContentError;

/// Difficulty level attached to a topic page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse a difficulty label, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for unknown labels.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Lowercase label as used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the discovered content hierarchy.
///
/// Directories and documents share this shape: a node is a directory when it
/// has at least one child. Parents exclusively own their children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Normalized URL path (e.g., "/physics/mechanics/kinematics").
    pub path: String,
    /// Title from front matter or the backend's own metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Explicit sort order (treated as `0` when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Difficulty level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    /// Create a node with only a path. The path is normalized.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: path::normalize(path),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: ContentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Final path segment (file or directory name).
    #[must_use]
    pub fn name(&self) -> &str {
        path::last_segment(&self.path)
    }

    /// True if the node has at least one child.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        !self.children.is_empty()
    }

    /// Find a descendant (or self) by normalized path.
    #[must_use]
    pub fn find(&self, target: &str) -> Option<&ContentNode> {
        let mut current = self;
        loop {
            if current.path == target {
                return Some(current);
            }
            current = current
                .children
                .iter()
                .find(|c| c.path == target || path::is_beneath(target, &c.path))?;
        }
    }

    /// Consume the tree and return the subtree at the normalized path.
    #[must_use]
    pub fn into_subtree(self, target: &str) -> Option<ContentNode> {
        let mut current = self;
        loop {
            if current.path == target {
                return Some(current);
            }
            current = current
                .children
                .into_iter()
                .find(|c| c.path == target || path::is_beneath(target, &c.path))?;
        }
    }

    /// Coerce untyped node data into a [`ContentNode`] tree.
    ///
    /// Accepts either a single node object or an array of top-level nodes
    /// (which become children of a synthetic root). Node objects need a string
    /// `path` (or `_path`); other fields are coerced leniently:
    /// - `title`/`description`: non-blank strings, otherwise dropped
    /// - `order`: integers, integral floats, or numeric strings
    /// - `difficulty`: known labels in any case
    ///
    /// # Errors
    ///
    /// Returns an `InvalidData` error if the value is not an object/array, a
    /// node has no string path, or `children` is not an array.
    pub fn from_value(value: &Value) -> Result<Self, ContentError> {
        match value {
            Value::Array(items) => {
                let children = items
                    .iter()
                    .map(Self::coerce_node)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self {
                    path: path::ROOT.to_owned(),
                    children,
                    ..Self::default()
                })
            }
            Value::Object(_) => Self::coerce_node(value),
            _ => Err(ContentError::invalid_data(
                "content tree must be an object or an array",
            )),
        }
    }

    fn coerce_node(value: &Value) -> Result<Self, ContentError> {
        let Value::Object(map) = value else {
            return Err(ContentError::invalid_data("content node must be an object"));
        };

        let raw_path = map
            .get("path")
            .or_else(|| map.get("_path"))
            .and_then(Value::as_str)
            .ok_or_else(|| ContentError::invalid_data("content node requires a string path"))?;
        let node_path = path::normalize(raw_path);

        let children = match map.get("children") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(Self::coerce_node)
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(ContentError::invalid_data("children must be an array")
                    .with_path(node_path));
            }
        };

        let order = map.get("order").and_then(|v| {
            let coerced = coerce_order(v);
            if coerced.is_none() && !v.is_null() {
                tracing::debug!(path = %node_path, value = %v, "Ignoring non-integer order");
            }
            coerced
        });

        let difficulty = map
            .get("difficulty")
            .and_then(Value::as_str)
            .and_then(Difficulty::parse);

        Ok(Self {
            title: non_blank(map.get("title")),
            description: non_blank(map.get("description")),
            order,
            difficulty,
            children,
            path: node_path,
        })
    }
}

/// Extract a trimmed, non-empty string.
fn non_blank(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_owned())
}

/// Coerce an order value to an integer.
#[allow(clippy::cast_possible_truncation)]
fn coerce_order(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Directory-level metadata from a sidecar file (e.g., `_dir.yml`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirMetadata {
    /// Directory title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Directory description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Explicit sort order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::ContentErrorKind;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("beginner"), Some(Difficulty::Beginner));
        assert_eq!(Difficulty::parse(" Advanced "), Some(Difficulty::Advanced));
        assert_eq!(Difficulty::parse("expert"), None);
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        let json = serde_json::to_value(Difficulty::Intermediate).unwrap();
        assert_eq!(json, json!("intermediate"));
    }

    #[test]
    fn test_new_normalizes_path() {
        let node = ContentNode::new("physics/mechanics/");
        assert_eq!(node.path, "/physics/mechanics");
        assert_eq!(node.name(), "mechanics");
        assert!(!node.is_directory());
    }

    #[test]
    fn test_find_and_into_subtree() {
        let tree = ContentNode::new("/").with_child(
            ContentNode::new("/physics")
                .with_child(ContentNode::new("/physics/mechanics").with_title("Mechanics"))
                .with_child(ContentNode::new("/physics/mechanics-extra")),
        );

        let found = tree.find("/physics/mechanics").unwrap();
        assert_eq!(found.title.as_deref(), Some("Mechanics"));
        assert!(tree.find("/physics/optics").is_none());
        assert_eq!(tree.find("/").unwrap().path, "/");

        let subtree = tree.into_subtree("/physics/mechanics-extra").unwrap();
        assert_eq!(subtree.path, "/physics/mechanics-extra");
    }

    #[test]
    fn test_from_value_object() {
        let value = json!({
            "path": "/physics/mechanics",
            "title": "  力学 ",
            "order": "2",
            "difficulty": "Beginner",
            "children": [
                {"_path": "/physics/mechanics/kinematics", "order": 1.0},
                {"path": "/physics/mechanics/index", "title": ""}
            ]
        });

        let node = ContentNode::from_value(&value).unwrap();

        assert_eq!(node.path, "/physics/mechanics");
        assert_eq!(node.title.as_deref(), Some("力学"));
        assert_eq!(node.order, Some(2));
        assert_eq!(node.difficulty, Some(Difficulty::Beginner));
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].path, "/physics/mechanics/kinematics");
        assert_eq!(node.children[0].order, Some(1));
        assert!(node.children[1].title.is_none());
    }

    #[test]
    fn test_from_value_array_becomes_root() {
        let value = json!([{"path": "/physics"}, {"path": "/chemistry"}]);

        let node = ContentNode::from_value(&value).unwrap();

        assert_eq!(node.path, "/");
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn test_from_value_lenient_fields() {
        let value = json!({
            "path": "/a",
            "order": "first",
            "difficulty": "expert",
            "description": 42,
            "children": null
        });

        let node = ContentNode::from_value(&value).unwrap();

        assert_eq!(node.order, None);
        assert_eq!(node.difficulty, None);
        assert_eq!(node.description, None);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_from_value_rejects_missing_path() {
        let err = ContentNode::from_value(&json!({"title": "No path"})).unwrap_err();
        assert_eq!(err.kind(), ContentErrorKind::InvalidData);
    }

    #[test]
    fn test_from_value_rejects_bad_children() {
        let err = ContentNode::from_value(&json!({"path": "/a", "children": "b"})).unwrap_err();
        assert_eq!(err.kind(), ContentErrorKind::InvalidData);
        assert_eq!(err.path(), Some("/a"));
    }

    #[test]
    fn test_from_value_rejects_scalar() {
        assert!(ContentNode::from_value(&json!("nope")).is_err());
    }
}

//! Output types of the navigation engine.
//!
//! Everything here is plain serializable data: results cross the HTTP boundary
//! as JSON and are shared out of the cache behind an `Arc`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use atlas_catalog::NavItem;
use atlas_content::{Difficulty, path};

/// Navigation item for the sidebar tree.
///
/// A leaf never carries `children`. A directory whose displayable children
/// were all filtered out carries `None` rather than an empty list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub title: String,
    pub path: String,
    pub is_directory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavigationItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub order: i64,
}

impl NavigationItem {
    /// Create a leaf item.
    #[must_use]
    pub fn leaf(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            is_directory: false,
            children: None,
            description: None,
            icon: None,
            difficulty: None,
            order: 0,
        }
    }

    /// Create a directory item; empty `children` collapse to `None`.
    #[must_use]
    pub fn directory(
        title: impl Into<String>,
        path: impl Into<String>,
        children: Vec<NavigationItem>,
    ) -> Self {
        Self {
            is_directory: true,
            children: (!children.is_empty()).then_some(children),
            ..Self::leaf(title, path)
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Convert a hand-authored entry, sorting every level.
    ///
    /// `is_directory` follows the presence of children. Paths are copied as
    /// written, since catalog validation already rejects malformed ones.
    #[must_use]
    pub fn from_nav_item(item: &NavItem) -> Self {
        let mut children: Vec<Self> = item.children.iter().map(Self::from_nav_item).collect();
        sort_items(&mut children);

        Self {
            title: item.title.clone(),
            path: item.path.clone(),
            is_directory: !children.is_empty(),
            children: (!children.is_empty()).then_some(children),
            description: item.description.clone(),
            icon: item.icon.clone(),
            difficulty: item.difficulty,
            order: item.order.unwrap_or(0),
        }
    }

    /// Displayable children, empty for leaves and collapsed directories.
    #[must_use]
    pub fn children(&self) -> &[NavigationItem] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Breadcrumb entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub title: String,
    pub path: String,
}

impl BreadcrumbItem {
    #[must_use]
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }

    /// The synthetic first crumb.
    #[must_use]
    pub fn home() -> Self {
        Self::new("Home", path::ROOT)
    }
}

/// Total order for sibling items.
///
/// `order` ascending, then directories before leaves, then titles compared
/// case-insensitively. Raw title and path break any remaining tie so equal
/// inputs always produce the same sequence.
#[must_use]
pub fn compare_items(a: &NavigationItem, b: &NavigationItem) -> Ordering {
    a.order
        .cmp(&b.order)
        .then_with(|| b.is_directory.cmp(&a.is_directory))
        .then_with(|| compare_titles(&a.title, &b.title))
        .then_with(|| a.path.cmp(&b.path))
}

/// Compare titles case-folded first, raw second.
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort one level of siblings.
pub fn sort_items(items: &mut [NavigationItem]) {
    items.sort_by(compare_items);
}

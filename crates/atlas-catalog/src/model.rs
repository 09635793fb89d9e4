//! Catalog data types.
//!
//! These are the hand-authored records: subjects own categories, and a
//! category may carry an explicit navigation tree that replaces content
//! discovery for that category.

use serde::{Deserialize, Serialize};

use atlas_content::{Difficulty, path};

/// A hand-authored navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub title: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    /// Create an item with a title and path.
    #[must_use]
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            description: None,
            difficulty: None,
            icon: None,
            order: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: NavItem) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search for an item (or descendant) with the given path.
    #[must_use]
    pub fn find(&self, target: &str) -> Option<&NavItem> {
        if self.path == target {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(target))
    }
}

/// A category within a subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon identifier. Filled from the catalog default when omitted.
    #[serde(default)]
    pub icon: String,
    /// Category path. Defaults to `/{subject}/{id}` when omitted.
    #[serde(default)]
    pub path: String,
    /// Explicit navigation tree. When present, content discovery is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Vec<NavItem>>,
}

impl Category {
    /// Create a category with an id and title; path and icon are filled in
    /// when the catalog is built.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            icon: String::new(),
            path: String::new(),
            navigation: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_navigation(mut self, navigation: Vec<NavItem>) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// True if the category has an explicit navigation tree.
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        self.navigation.is_some()
    }

    /// Project the category into [`NavItem`] form.
    #[must_use]
    pub fn to_nav_item(&self) -> NavItem {
        NavItem {
            title: self.title.clone(),
            path: self.path.clone(),
            description: self.description.clone(),
            difficulty: None,
            icon: Some(self.icon.clone()),
            order: None,
            children: Vec::new(),
        }
    }
}

/// A top-level subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Icon identifier. Filled from the catalog default when omitted.
    #[serde(default)]
    pub icon: String,
    /// Subject path. Defaults to `/{id}` when omitted.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Subject {
    /// Create a subject with an id and title; path and icon are filled in
    /// when the catalog is built.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            icon: String::new(),
            path: String::new(),
            categories: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Find a category by id, or by its path `/{subject-segment}/{segment}`.
    #[must_use]
    pub fn category_by_segment(&self, segment: &str) -> Option<&Category> {
        let by_path = path::join(&self.path, segment);
        self.categories
            .iter()
            .find(|c| c.id == segment || c.path == by_path)
    }

    /// Project the subject into [`NavItem`] form.
    #[must_use]
    pub fn to_nav_item(&self) -> NavItem {
        NavItem {
            title: self.title.clone(),
            path: self.path.clone(),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            difficulty: None,
            icon: Some(self.icon.clone()),
            order: None,
            children: Vec::new(),
        }
    }

    /// Fill defaults: derive missing paths from ids and missing icons from
    /// `default_icon`. Given paths are kept verbatim for validation.
    pub(crate) fn fill_defaults(&mut self, default_icon: &str) {
        if self.path.is_empty() {
            self.path = path::join(path::ROOT, &self.id);
        }
        if self.icon.is_empty() {
            self.icon = default_icon.to_owned();
        }
        for category in &mut self.categories {
            if category.path.is_empty() {
                category.path = path::join(&self.path, &category.id);
            }
            if category.icon.is_empty() {
                category.icon = default_icon.to_owned();
            }
        }
    }
}

//! The loaded catalog and its lookups.

use std::path::Path;

use serde::{Deserialize, Serialize};

use atlas_content::path;

use crate::error::CatalogError;
use crate::model::{Category, NavItem, Subject};
use crate::validate::validate;

/// Icon used for subjects and categories that do not name one.
pub const DEFAULT_ICON: &str = "i-heroicons-folder";

/// Catalog file layout.
#[derive(Deserialize)]
struct CatalogFile {
    default_icon: Option<String>,
    #[serde(default)]
    subjects: Vec<Subject>,
}

/// Immutable, validated table of subjects and categories.
///
/// Built once at startup; every lookup borrows from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    default_icon: String,
    subjects: Vec<Subject>,
}

/// A category together with its owning subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    #[serde(flatten)]
    pub category: Category,
    pub subject_id: String,
    pub subject_title: String,
}

/// A subject, category or explicit navigation item in the flat search index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    #[serde(flatten)]
    pub item: NavItem,
    pub subject_id: String,
    pub subject_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_title: Option<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            default_icon: DEFAULT_ICON.to_owned(),
            subjects: Vec::new(),
        }
    }
}

impl Catalog {
    /// Build a catalog from subjects, filling defaults and validating.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] if the subjects violate the
    /// catalog rules.
    pub fn new(subjects: Vec<Subject>) -> Result<Self, CatalogError> {
        Self::build(subjects, DEFAULT_ICON.to_owned())
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn load(file: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(file).map_err(|source| CatalogError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %file.display(),
            subjects = catalog.subjects.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for invalid YAML and
    /// [`CatalogError::Malformed`] for structural problems.
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: CatalogFile = serde_yaml::from_str(content)?;
        let default_icon = file
            .default_icon
            .filter(|icon| !icon.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_owned());
        Self::build(file.subjects, default_icon)
    }

    fn build(mut subjects: Vec<Subject>, default_icon: String) -> Result<Self, CatalogError> {
        for subject in &mut subjects {
            subject.fill_defaults(&default_icon);
        }
        validate(&subjects)?;
        Ok(Self {
            default_icon,
            subjects,
        })
    }

    /// All subjects in configuration order.
    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Icon for categories discovered from content.
    #[must_use]
    pub fn default_icon(&self) -> &str {
        &self.default_icon
    }

    /// Look up a subject by id.
    #[must_use]
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Find a subject by id, or by its path `/{segment}`.
    #[must_use]
    pub fn subject_by_segment(&self, segment: &str) -> Option<&Subject> {
        let by_path = path::join(path::ROOT, segment);
        self.subjects
            .iter()
            .find(|s| s.id == segment || s.path == by_path)
    }

    /// Look up a category by subject id and category id.
    #[must_use]
    pub fn category(&self, subject_id: &str, category_id: &str) -> Option<&Category> {
        self.subject(subject_id)?
            .categories
            .iter()
            .find(|c| c.id == category_id)
    }

    /// Look up a configured category by its path.
    ///
    /// The path is normalized before comparison.
    #[must_use]
    pub fn category_by_path(&self, category_path: &str) -> Option<(&Subject, &Category)> {
        let target = path::normalize(category_path);
        self.subjects.iter().find_map(|subject| {
            subject
                .categories
                .iter()
                .find(|c| c.path == target)
                .map(|category| (subject, category))
        })
    }

    /// Find a subject, category, or explicit navigation item by path.
    ///
    /// Subjects and categories are projected into [`NavItem`] form. Subjects
    /// win over categories, which win over navigation items.
    #[must_use]
    pub fn find_by_path(&self, target: &str) -> Option<NavItem> {
        let target = path::normalize(target);
        for subject in &self.subjects {
            if subject.path == target {
                return Some(subject.to_nav_item());
            }
            for category in &subject.categories {
                if category.path == target {
                    return Some(category.to_nav_item());
                }
                if let Some(found) = category
                    .navigation
                    .iter()
                    .flatten()
                    .find_map(|item| item.find(&target))
                {
                    return Some(found.clone());
                }
            }
        }
        None
    }

    /// Flat list of all categories with their owning subject.
    #[must_use]
    pub fn all_categories(&self) -> Vec<CategoryEntry> {
        self.subjects
            .iter()
            .flat_map(|subject| {
                subject.categories.iter().map(|category| CategoryEntry {
                    category: category.clone(),
                    subject_id: subject.id.clone(),
                    subject_title: subject.title.clone(),
                })
            })
            .collect()
    }

    /// Flat list of every subject, category and explicit navigation item.
    ///
    /// Entries appear in configuration order, parents before children.
    /// Navigation items are listed without their children.
    #[must_use]
    pub fn search_index(&self) -> Vec<SearchEntry> {
        let mut entries = Vec::new();
        for subject in &self.subjects {
            entries.push(SearchEntry {
                item: subject.to_nav_item(),
                subject_id: subject.id.clone(),
                subject_title: subject.title.clone(),
                category_id: None,
                category_title: None,
            });

            for category in &subject.categories {
                let entry = |item: NavItem| SearchEntry {
                    item,
                    subject_id: subject.id.clone(),
                    subject_title: subject.title.clone(),
                    category_id: Some(category.id.clone()),
                    category_title: Some(category.title.clone()),
                };
                entries.push(entry(category.to_nav_item()));

                let mut stack: Vec<&NavItem> =
                    category.navigation.iter().flatten().rev().collect();
                while let Some(item) = stack.pop() {
                    stack.extend(item.children.iter().rev());
                    entries.push(entry(NavItem {
                        children: Vec::new(),
                        ..item.clone()
                    }));
                }
            }
        }
        entries
    }
}

//! Hand-authored subject and category catalog.
//!
//! The catalog is the declarative half of navigation: it names subjects and
//! categories, their icons and descriptions, and optionally pins an explicit
//! navigation tree for a category. It is loaded once from YAML, validated,
//! and read-only afterwards.
//!
//! # Example
//!
//! ```yaml
//! default_icon: i-heroicons-folder
//! subjects:
//!   - id: physics
//!     title: 物理学
//!     icon: i-heroicons-bolt
//!     categories:
//!       - id: mechanics
//!         title: 力学
//! ```
//!
//! Paths default to `/{subject}` and `/{subject}/{category}`.

mod catalog;
mod error;
mod model;
mod validate;

pub use catalog::{Catalog, CategoryEntry, DEFAULT_ICON, SearchEntry};
pub use error::CatalogError;
pub use model::{Category, NavItem, Subject};

//! Content source abstraction for the Atlas navigation engine.
//!
//! This crate provides a [`ContentSource`] trait for abstracting access to the
//! discovered content hierarchy (directories and leaf documents). The
//! navigation engine only ever sees [`ContentNode`] trees, regardless of
//! whether they came from a filesystem walk, a database, or a remote API.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentSource`] trait with `fetch_tree()`, `fetch_node()` and `dir_metadata()`
//! - [`ContentNode`], the single typed node contract at the collaborator boundary
//! - [`JsonContentSource`] for exported content trees stored as JSON
//! - [`MockContentSource`] for testing (behind `mock` feature flag)
//! - [`path`] helpers for the `/`-separated URL path convention
//!
//! # Example
//!
//! ```ignore
//! use atlas_content::{ContentSource, JsonContentSource};
//!
//! let source = JsonContentSource::new("content.json");
//! if let Some(node) = source.fetch_node("/physics/mechanics").await? {
//!     for child in &node.children {
//!         println!("{}", child.path);
//!     }
//! }
//! ```

mod json;
#[cfg(feature = "mock")]
mod mock;
mod node;
pub mod path;
mod source;

pub use json::JsonContentSource;
#[cfg(feature = "mock")]
pub use mock::MockContentSource;
pub use node::{ContentNode, Difficulty, DirMetadata};
pub use source::{ContentError, ContentErrorKind, ContentSource};

//! Title resolution.
//!
//! A single precedence chain, first non-blank value wins:
//!
//! 1. Explicit title (front matter or catalog)
//! 2. Directory metadata title (`_dir.yml`)
//! 3. The item name, formatted for display

use std::sync::LazyLock;

use regex::Regex;

/// Title used when every rung of the chain is empty.
pub const UNTITLED: &str = "Untitled";

/// Leading ordering prefix such as `1.`, `02-` or `10_`.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.\-_]").unwrap());

/// Resolve a display title for a content item.
///
/// Never returns an empty string.
#[must_use]
pub fn resolve_title(name: &str, explicit: Option<&str>, dir_title: Option<&str>) -> String {
    [explicit, dir_title]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|title| !title.is_empty())
        .map_or_else(|| format_name(name), str::to_owned)
}

/// Format a raw item name for display.
///
/// Strips a trailing `.md`, a leading numeric prefix, and turns `-`/`_` into
/// spaces. Falls back to [`UNTITLED`].
#[must_use]
pub fn format_name(name: &str) -> String {
    let stem = name.trim();
    let stem = stem.strip_suffix(".md").unwrap_or(stem);
    let stem = NUMERIC_PREFIX.replace(stem, "");
    let formatted = stem.replace(['-', '_'], " ");
    let formatted = formatted.trim();

    if formatted.is_empty() {
        UNTITLED.to_owned()
    } else {
        formatted.to_owned()
    }
}

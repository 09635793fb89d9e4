//! URL path helpers.
//!
//! All paths handled by the engine are `/`-separated URL paths:
//! - `"/"` - root (never a subject or category)
//! - `"/physics"` - subject
//! - `"/physics/mechanics"` - category
//! - `"/physics/mechanics/kinematics/two-dim"` - nested page
//!
//! Paths are compared in normalized form: leading slash, no trailing slash,
//! no empty segments.

/// Root path.
pub const ROOT: &str = "/";

/// Normalize a path to the canonical `/a/b` form.
///
/// Empty segments are dropped, so `"physics//mechanics/"` becomes
/// `"/physics/mechanics"`. Empty input and `"/"` both normalize to the root.
#[must_use]
pub fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in segments(path) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Iterate over the non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.trim()
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Number of non-empty segments (`0` for the root).
#[must_use]
pub fn depth(path: &str) -> usize {
    segments(path).count()
}

/// Final segment of a path, or `""` for the root.
#[must_use]
pub fn last_segment(path: &str) -> &str {
    segments(path).last().unwrap_or("")
}

/// Append a segment to a normalized base path.
#[must_use]
pub fn join(base: &str, segment: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}/{segment}")
}

/// Check whether `path` lies strictly beneath `ancestor`.
///
/// Both arguments must be normalized.
#[must_use]
pub fn is_beneath(path: &str, ancestor: &str) -> bool {
    if ancestor == ROOT {
        return path != ROOT && path.starts_with('/');
    }
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}

/// Check whether a path is already in canonical form.
///
/// A well-formed path starts with `/`, has no trailing slash (except the root),
/// no empty segments, and no `.`/`..` segments.
#[must_use]
pub fn is_well_formed(path: &str) -> bool {
    if path == ROOT {
        return true;
    }
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    rest.split('/')
        .all(|s| !s.is_empty() && s != "." && s != ".." && s.trim() == s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("physics"), "/physics");
        assert_eq!(normalize("/physics/mechanics/"), "/physics/mechanics");
        assert_eq!(normalize("physics//mechanics"), "/physics/mechanics");
        assert_eq!(normalize("/chemistry/元素周期表"), "/chemistry/元素周期表");
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth("/"), 0);
        assert_eq!(depth("/physics"), 1);
        assert_eq!(depth("/physics/mechanics"), 2);
        assert_eq!(depth("physics/mechanics/kinematics/"), 3);
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("/"), "");
        assert_eq!(last_segment("/physics/mechanics"), "mechanics");
        assert_eq!(last_segment("/physics/mechanics/index.md"), "index.md");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "physics"), "/physics");
        assert_eq!(join("/physics", "mechanics"), "/physics/mechanics");
    }

    #[test]
    fn test_is_beneath() {
        assert!(is_beneath("/physics/mechanics", "/physics"));
        assert!(is_beneath("/physics/mechanics/kinematics", "/physics"));
        assert!(is_beneath("/physics", "/"));
        assert!(!is_beneath("/physics", "/physics"));
        assert!(!is_beneath("/physicsx/mechanics", "/physics"));
        assert!(!is_beneath("/", "/"));
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("/"));
        assert!(is_well_formed("/physics/mechanics"));
        assert!(!is_well_formed("physics"));
        assert!(!is_well_formed("/physics/"));
        assert!(!is_well_formed("/physics//mechanics"));
        assert!(!is_well_formed("/physics/../chemistry"));
        assert!(!is_well_formed("/physics/ mechanics"));
    }
}

//! YAML parsing for page front matter and directory metadata files.

use serde::Deserialize;

use atlas_content::{Difficulty, DirMetadata};

/// Fields read from a page's front matter block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i64>,
    pub difficulty: Option<Difficulty>,
}

/// Raw front matter as written by authors.
///
/// `order` and `difficulty` are accepted loosely and coerced afterwards, so a
/// typo in one field does not discard the title.
#[derive(Deserialize)]
struct RawFields {
    title: Option<String>,
    description: Option<String>,
    order: Option<RawOrder>,
    difficulty: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOrder {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawOrder {
    #[allow(clippy::cast_possible_truncation)]
    fn coerce(self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(n),
            Self::Float(f) => (f.fract() == 0.0).then_some(f as i64),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Return the YAML between the opening and closing `---` fences.
///
/// The opening fence must be the very first line (a UTF-8 BOM is tolerated).
/// The block may also be closed with `...`. Returns `None` when the document
/// has no front matter.
pub(crate) fn split_front_matter(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let fence = line.trim_end();
        if fence == "---" || fence == "..." {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

/// Parse the front matter of a markdown document.
///
/// Documents without front matter yield an empty [`FrontMatter`].
///
/// # Errors
///
/// Returns an error if the front matter block is not valid YAML.
pub(crate) fn parse_front_matter(content: &str) -> Result<FrontMatter, serde_yaml::Error> {
    let Some(block) = split_front_matter(content) else {
        return Ok(FrontMatter::default());
    };
    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let raw: RawFields = serde_yaml::from_str(block)?;
    Ok(FrontMatter {
        title: non_blank(raw.title),
        description: non_blank(raw.description),
        order: raw.order.and_then(RawOrder::coerce),
        difficulty: raw.difficulty.as_deref().and_then(Difficulty::parse),
    })
}

/// Parse a directory metadata file (e.g., `_dir.yml`).
///
/// Returns `None` for an empty file or one that sets no known field.
///
/// # Errors
///
/// Returns an error if the YAML is malformed.
pub(crate) fn parse_dir_metadata(content: &str) -> Result<Option<DirMetadata>, serde_yaml::Error> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let meta: DirMetadata = serde_yaml::from_str(trimmed)?;
    let meta = DirMetadata {
        title: non_blank(meta.title),
        description: non_blank(meta.description),
        icon: non_blank(meta.icon),
        order: meta.order,
    };
    Ok((meta != DirMetadata::default()).then_some(meta))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // ── split_front_matter tests ─────────────────────────────────────

    #[test]
    fn test_split_front_matter() {
        let doc = "---\ntitle: Kinematics\n---\n# Body";
        assert_eq!(split_front_matter(doc), Some("title: Kinematics\n"));
    }

    #[test]
    fn test_split_front_matter_crlf_and_bom() {
        let doc = "\u{feff}---\r\ntitle: A\r\n---\r\nbody";
        assert_eq!(split_front_matter(doc), Some("title: A\r\n"));
    }

    #[test]
    fn test_split_front_matter_dot_fence() {
        assert_eq!(split_front_matter("---\ntitle: A\n...\n"), Some("title: A\n"));
    }

    #[test]
    fn test_split_front_matter_absent() {
        assert_eq!(split_front_matter("# Heading\n---\n"), None);
        assert_eq!(split_front_matter("---\ntitle: unterminated"), None);
        assert_eq!(split_front_matter(""), None);
    }

    // ── parse_front_matter tests ─────────────────────────────────────

    #[test]
    fn test_parse_front_matter_all_fields() {
        let doc = "---\ntitle: \"运动学\"\ndescription: |\n  Motion\n  without forces\norder: 2\ndifficulty: Beginner\n---\n";

        let fm = parse_front_matter(doc).unwrap();

        assert_eq!(
            fm,
            FrontMatter {
                title: Some("运动学".to_owned()),
                description: Some("Motion\nwithout forces".to_owned()),
                order: Some(2),
                difficulty: Some(Difficulty::Beginner),
            }
        );
    }

    #[test]
    fn test_parse_front_matter_lenient_order() {
        let fm = parse_front_matter("---\norder: \"3\"\n---\n").unwrap();
        assert_eq!(fm.order, Some(3));

        let fm = parse_front_matter("---\norder: 4.0\n---\n").unwrap();
        assert_eq!(fm.order, Some(4));

        let fm = parse_front_matter("---\ntitle: Kept\norder: first\n---\n").unwrap();
        assert_eq!(fm.order, None);
        assert_eq!(fm.title.as_deref(), Some("Kept"));
    }

    #[test]
    fn test_parse_front_matter_unknown_difficulty() {
        let fm = parse_front_matter("---\ndifficulty: expert\n---\n").unwrap();
        assert!(fm.difficulty.is_none());
    }

    #[test]
    fn test_parse_front_matter_blank_title_is_none() {
        let fm = parse_front_matter("---\ntitle: \"  \"\n---\n").unwrap();
        assert!(fm.title.is_none());
    }

    #[test]
    fn test_parse_front_matter_missing_or_empty() {
        assert_eq!(parse_front_matter("# Just markdown").unwrap(), FrontMatter::default());
        assert_eq!(parse_front_matter("---\n---\n").unwrap(), FrontMatter::default());
    }

    #[test]
    fn test_parse_front_matter_invalid_yaml() {
        assert!(parse_front_matter("---\ntitle: [broken\n---\n").is_err());
    }

    // ── parse_dir_metadata tests ─────────────────────────────────────

    #[test]
    fn test_parse_dir_metadata() {
        let meta = parse_dir_metadata("title: 力学\nicon: i-heroicons-cube\norder: 1\n")
            .unwrap()
            .unwrap();

        assert_eq!(meta.title.as_deref(), Some("力学"));
        assert_eq!(meta.icon.as_deref(), Some("i-heroicons-cube"));
        assert_eq!(meta.order, Some(1));
        assert!(meta.description.is_none());
    }

    #[test]
    fn test_parse_dir_metadata_empty() {
        assert!(parse_dir_metadata("").unwrap().is_none());
        assert!(parse_dir_metadata("  \n").unwrap().is_none());
        assert!(parse_dir_metadata("unrelated: true").unwrap().is_none());
    }

    #[test]
    fn test_parse_dir_metadata_invalid() {
        assert!(parse_dir_metadata("title: [broken").is_err());
    }
}

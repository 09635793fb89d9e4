//! Structural validation of a catalog.
//!
//! All problems are collected so a single `atlas check` run reports every
//! mistake in the file rather than the first one.

use std::collections::HashSet;

use atlas_content::path;

use crate::error::CatalogError;
use crate::model::{NavItem, Subject};

/// Validate subjects after defaults have been filled in.
pub(crate) fn validate(subjects: &[Subject]) -> Result<(), CatalogError> {
    let mut problems = Vec::new();
    let mut subject_ids = HashSet::new();
    let mut subject_paths = HashSet::new();

    for subject in subjects {
        let label = format!("subject \"{}\"", subject.id);
        require_non_blank(&subject.id, "subject id", &mut problems);
        require_non_blank(&subject.title, &format!("{label} title"), &mut problems);

        if !subject_ids.insert(subject.id.as_str()) {
            problems.push(format!("duplicate subject id \"{}\"", subject.id));
        }

        if check_path(&subject.path, &label, &mut problems) && path::depth(&subject.path) != 1 {
            problems.push(format!(
                "{label}: path \"{}\" must have exactly one segment",
                subject.path
            ));
        }
        if !subject_paths.insert(subject.path.as_str()) {
            problems.push(format!("duplicate subject path \"{}\"", subject.path));
        }
    }

    let mut category_paths = HashSet::new();
    for subject in subjects {
        let mut category_ids = HashSet::new();
        for category in &subject.categories {
            let label = format!("category \"{}/{}\"", subject.id, category.id);
            require_non_blank(&category.id, &format!("{label} id"), &mut problems);
            require_non_blank(&category.title, &format!("{label} title"), &mut problems);

            if !category_ids.insert(category.id.as_str()) {
                problems.push(format!(
                    "subject \"{}\": duplicate category id \"{}\"",
                    subject.id, category.id
                ));
            }

            if check_path(&category.path, &label, &mut problems) {
                if subject_paths.contains(category.path.as_str()) {
                    problems.push(format!(
                        "{label}: path \"{}\" collides with a subject path",
                        category.path
                    ));
                } else if !path::is_beneath(&category.path, &subject.path) {
                    problems.push(format!(
                        "{label}: path \"{}\" is not beneath subject path \"{}\"",
                        category.path, subject.path
                    ));
                }
            }
            if !category_paths.insert(category.path.as_str()) {
                problems.push(format!("duplicate category path \"{}\"", category.path));
            }

            for item in category.navigation.iter().flatten() {
                check_nav_item(item, &label, &mut problems);
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::Malformed(problems.join("; ")))
    }
}

fn require_non_blank(value: &str, field: &str, problems: &mut Vec<String>) {
    if value.trim().is_empty() {
        problems.push(format!("{field} cannot be empty"));
    }
}

/// Check that a subject or category path is well-formed and not the root.
///
/// Returns `true` if further checks on the path make sense.
fn check_path(value: &str, label: &str, problems: &mut Vec<String>) -> bool {
    if !path::is_well_formed(value) {
        problems.push(format!("{label}: path \"{value}\" is not well-formed"));
        return false;
    }
    if value == path::ROOT {
        problems.push(format!("{label}: root path \"/\" is reserved"));
        return false;
    }
    true
}

fn check_nav_item(item: &NavItem, label: &str, problems: &mut Vec<String>) {
    require_non_blank(
        &item.title,
        &format!("{label}: navigation item \"{}\" title", item.path),
        problems,
    );
    if !path::is_well_formed(&item.path) {
        problems.push(format!(
            "{label}: navigation path \"{}\" is not well-formed",
            item.path
        ));
    }
    for child in &item.children {
        check_nav_item(child, label, problems);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn subject(id: &str) -> Subject {
        let mut subject = Subject::new(id, id.to_uppercase());
        subject.fill_defaults("i");
        subject
    }

    fn malformed(subjects: &[Subject]) -> String {
        match validate(subjects) {
            Err(CatalogError::Malformed(message)) => message,
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_catalog() {
        let mut physics = Subject::new("physics", "物理学")
            .with_category(Category::new("mechanics", "力学").with_navigation(vec![
                NavItem::new("力学概述", "/physics/mechanics"),
            ]))
            .with_category(Category::new("deep", "Deep").with_path("/physics/a/b"));
        physics.fill_defaults("i");

        assert!(validate(&[physics, subject("chemistry")]).is_ok());
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        assert!(validate(&[]).is_ok());
    }

    #[test]
    fn test_empty_id_and_title() {
        let mut blank = Subject::new(" ", "");
        blank.path = "/blank".to_owned();

        let message = malformed(&[blank]);

        assert!(message.contains("subject id cannot be empty"));
        assert!(message.contains("title cannot be empty"));
    }

    #[test]
    fn test_duplicate_subjects() {
        let message = malformed(&[subject("physics"), subject("physics")]);

        assert!(message.contains("duplicate subject id \"physics\""));
        assert!(message.contains("duplicate subject path \"/physics\""));
    }

    #[test]
    fn test_subject_path_rules() {
        let root = Subject::new("home", "Home").with_path("/");
        let deep = Subject::new("deep", "Deep").with_path("/a/b");
        let sloppy = Subject::new("sloppy", "Sloppy").with_path("/sloppy/");

        let message = malformed(&[root, deep, sloppy]);

        assert!(message.contains("root path \"/\" is reserved"));
        assert!(message.contains("\"/a/b\" must have exactly one segment"));
        assert!(message.contains("\"/sloppy/\" is not well-formed"));
    }

    #[test]
    fn test_duplicate_category_ids_and_paths() {
        let mut physics = Subject::new("physics", "Physics")
            .with_category(Category::new("mechanics", "A"))
            .with_category(Category::new("mechanics", "B").with_path("/physics/other"))
            .with_category(Category::new("classical", "C").with_path("/physics/mechanics"));
        physics.fill_defaults("i");

        let message = malformed(&[physics]);

        assert!(message.contains("duplicate category id \"mechanics\""));
        assert!(message.contains("duplicate category path \"/physics/mechanics\""));
    }

    #[test]
    fn test_category_outside_subject() {
        let mut physics = Subject::new("physics", "Physics")
            .with_category(Category::new("organic", "Organic").with_path("/chemistry/organic"))
            .with_category(Category::new("clash", "Clash").with_path("/chemistry"));
        physics.fill_defaults("i");

        let message = malformed(&[physics, subject("chemistry")]);

        assert!(message.contains("\"/chemistry/organic\" is not beneath subject path \"/physics\""));
        assert!(message.contains("\"/chemistry\" collides with a subject path"));
    }

    #[test]
    fn test_bad_navigation_items() {
        let mut physics = Subject::new("physics", "Physics").with_category(
            Category::new("mechanics", "Mechanics").with_navigation(vec![
                NavItem::new("Ok", "/physics/mechanics")
                    .with_child(NavItem::new("", "physics/mechanics/bad")),
            ]),
        );
        physics.fill_defaults("i");

        let message = malformed(&[physics]);

        assert!(message.contains("navigation path \"physics/mechanics/bad\" is not well-formed"));
        assert!(message.contains("navigation item \"physics/mechanics/bad\" title cannot be empty"));
    }
}

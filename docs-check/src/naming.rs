//! Filename policy for documentation trees.
//!
//! - Markdown: `lowercase_with_underscores.md`, except the literal `README.md`
//! - YAML: `.yaml`, never `.yml`
//! - Extensions in lowercase
//! - No uppercase characters in directory names

use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;

pub const README_FILENAME: &str = "README.md";

static MD_BASENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^[a-z0-9_]+\.md$") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid basename regex: {err}"),
    }
});

fn has_uppercase(s: &str) -> bool {
    s.chars().any(char::is_uppercase)
}

fn directory_messages(rel_path: &Path) -> Vec<String> {
    let mut components: Vec<String> = rel_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    components.pop();

    components
        .into_iter()
        .filter(|dir| has_uppercase(dir))
        .map(|dir| format!("directory contains uppercase characters: '{dir}'"))
        .collect()
}

fn markdown_messages(name: &str, ext: &str) -> Vec<String> {
    let mut messages = Vec::new();

    if ext != "md" {
        messages.push(format!("extension must be lowercase '.md' (found '.{ext}')"));
    }
    if name == README_FILENAME {
        return messages;
    }
    if name.eq_ignore_ascii_case(README_FILENAME) {
        messages.push(format!(
            "index file must be named exactly '{README_FILENAME}' (found '{name}')"
        ));
        return messages;
    }
    if MD_BASENAME_PATTERN.is_match(name) {
        return messages;
    }

    let mut specific = false;
    if name.contains(' ') {
        messages.push("filename contains spaces; use underscores instead".to_owned());
        specific = true;
    }
    if name.contains('-') {
        messages.push("filename contains hyphen(s); use underscores instead".to_owned());
        specific = true;
    }
    if has_uppercase(name) {
        messages.push("filename contains uppercase letters; use lowercase only".to_owned());
        specific = true;
    }
    if !specific {
        messages.push(
            "filename must be lowercase with underscores and contain only letters, digits, \
             and underscores (e.g., 'my_doc_page.md')"
                .to_owned(),
        );
    }
    messages
}

/// Check one path, relative to the scan root, against the naming policy.
///
/// Every applicable rule reports; an empty list means the path is fine.
#[must_use]
pub fn check_path(rel_path: &Path) -> Vec<String> {
    let mut messages = directory_messages(rel_path);

    let Some(name) = rel_path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return messages;
    };
    let Some(ext) = rel_path.extension().map(|e| e.to_string_lossy().into_owned()) else {
        return messages;
    };

    match ext.to_lowercase().as_str() {
        "md" => messages.extend(markdown_messages(&name, &ext)),
        "yml" => messages.push(
            "YAML files must use the '.yaml' extension (rename from .yml to .yaml)".to_owned(),
        ),
        "yaml" if ext != "yaml" => {
            messages.push(format!("extension must be lowercase '.yaml' (found '.{ext}')"));
        }
        _ => {}
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(path: &str) -> Vec<String> {
        check_path(Path::new(path))
    }

    #[test]
    fn test_valid_names() {
        assert!(check("README.md").is_empty());
        assert!(check("guide/README.md").is_empty());
        assert!(check("getting_started.md").is_empty());
        assert!(check("api/v2/endpoints_2024.md").is_empty());
        assert!(check("config/settings.yaml").is_empty());
        assert!(check("images/Diagram.PNG").is_empty());
    }

    #[test]
    fn test_lowercase_readme_is_rejected() {
        let messages = check("readme.md");
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("exactly 'README.md'"));
    }

    #[test]
    fn test_uppercase_md_extension() {
        let messages = check("README.MD");
        assert!(messages.iter().any(|m| m.contains("lowercase '.md'")));
        assert!(messages.iter().any(|m| m.contains("exactly 'README.md'")));

        let messages = check("notes.Md");
        assert_eq!(messages[0], "extension must be lowercase '.md' (found '.Md')");
        assert!(messages.iter().any(|m| m.contains("uppercase letters")));
    }

    #[test]
    fn test_hyphen_and_uppercase_reported_separately() {
        let messages = check("My-Doc.md");
        assert_eq!(
            messages,
            vec![
                "filename contains hyphen(s); use underscores instead".to_owned(),
                "filename contains uppercase letters; use lowercase only".to_owned(),
            ]
        );
    }

    #[test]
    fn test_spaces() {
        let messages = check("my doc.md");
        assert_eq!(
            messages,
            vec!["filename contains spaces; use underscores instead".to_owned()]
        );
    }

    #[test]
    fn test_generic_message_when_no_specific_cause() {
        let messages = check("notes.v2.md");
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("filename must be lowercase with underscores"));
    }

    #[test]
    fn test_generic_message_not_suppressed_by_directory_case() {
        let messages = check("Guides/notes.v2.md");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "directory contains uppercase characters: 'Guides'");
        assert!(messages[1].starts_with("filename must be lowercase with underscores"));
    }

    #[test]
    fn test_yml_always_rejected() {
        assert_eq!(check("notes.yml").len(), 1);
        assert!(check("notes.yml")[0].contains("'.yaml'"));
        assert_eq!(check("Whatever-Name.YML").len(), 1);
    }

    #[test]
    fn test_uppercase_yaml_extension() {
        assert_eq!(
            check("settings.YAML"),
            vec!["extension must be lowercase '.yaml' (found '.YAML')".to_owned()]
        );
    }

    #[test]
    fn test_directory_case_applies_to_every_file_type() {
        let messages = check("Assets/Images/logo.png");
        assert_eq!(
            messages,
            vec![
                "directory contains uppercase characters: 'Assets'".to_owned(),
                "directory contains uppercase characters: 'Images'".to_owned(),
            ]
        );
    }

    #[test]
    fn test_reasons_are_distinguishable() {
        let reasons: Vec<String> = ["readme.md", "README.MD", "My-Doc.md", "my doc.md", "notes.yml"]
            .iter()
            .map(|p| check(p).join("; "))
            .collect();
        for reason in &reasons {
            assert!(!reason.is_empty());
        }
        let unique: std::collections::HashSet<&String> = reasons.iter().collect();
        assert_eq!(unique.len(), reasons.len());
    }
}

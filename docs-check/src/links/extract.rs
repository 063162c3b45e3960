//! Inline link extraction.
//!
//! A regex heuristic, not a CommonMark parser: `[text](target)` anywhere in
//! the file text, including inside code blocks.

use std::sync::LazyLock;

use regex::Regex;

/// Schemes that mark a target as external. Compared case-insensitively.
pub const EXTERNAL_SCHEMES: &[&str] = &["http://", "https://", "mailto:", "tel:", "ftp://", "data:"];

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"\[([^\]]+)\]\(([^)]+)\)") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid link regex: {err}"),
    }
});

/// One `[text](target)` occurrence in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub text: String,
    /// Trimmed raw target
    pub target: String,
    /// 1-indexed line of the opening `[`
    pub line: usize,
    /// Byte offset of the opening `[` in the file text
    pub offset: usize,
}

impl LinkReference {
    /// The link as written, for report context.
    #[must_use]
    pub fn as_markdown(&self) -> String {
        format!("[{}]({})", self.text, self.target)
    }

    /// Whether this target should go through path resolution at all.
    #[must_use]
    pub fn is_path_reference(&self) -> bool {
        !is_external_link(&self.target) && !is_anchor_only(&self.target)
    }
}

#[must_use]
pub fn is_external_link(target: &str) -> bool {
    let t = target.trim().to_lowercase();
    EXTERNAL_SCHEMES.iter().any(|scheme| t.starts_with(scheme))
}

#[must_use]
pub fn is_anchor_only(target: &str) -> bool {
    target.trim().starts_with('#')
}

/// Find every inline link in `content`, in order of appearance.
#[must_use]
pub fn extract_links(content: &str) -> Vec<LinkReference> {
    let mut links = Vec::new();
    let mut line = 1;
    let mut counted_to = 0;

    for caps in LINK_PATTERN.captures_iter(content) {
        let (Some(whole), Some(text), Some(target)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        let offset = whole.start();
        line += content[counted_to..offset].matches('\n').count();
        counted_to = offset;

        links.push(LinkReference {
            text: text.as_str().to_owned(),
            target: target.as_str().trim().to_owned(),
            line,
            offset,
        });
    }

    links
}

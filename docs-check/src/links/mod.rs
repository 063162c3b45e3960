//! Internal link checking.
//!
//! Extraction finds `[text](target)` references, resolution turns each path
//! reference into candidate files, and a target is broken when none of its
//! candidates exists.

pub mod extract;
pub mod resolve;

use std::path::Path;

use crate::error::{Violation, ViolationKind};

pub use extract::{LinkReference, extract_links, is_anchor_only, is_external_link};
pub use resolve::{FsProbe, LinkResolution, PathProbe, resolve_candidates, resolve_link};

/// Scan one file's text for links that do not resolve.
///
/// - `source_dir`: directory containing the file, as an absolute path
/// - `project_root`: base for `/`-rooted targets
#[must_use]
pub fn scan_links(
    content: &str,
    source_dir: &Path,
    project_root: &Path,
    probe: &dyn PathProbe,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for link in extract_links(content) {
        if !link.is_path_reference() {
            continue;
        }

        let resolution = resolve_link(source_dir, &link.target, project_root, probe);
        if !resolution.is_broken() {
            continue;
        }

        let reported = resolution
            .reported_path()
            .map_or_else(|| link.target.clone(), |p| p.display().to_string());
        tracing::debug!(
            link = %link.target,
            candidates = resolution.candidates.len(),
            "broken link"
        );
        violations.push(Violation::at_line(
            link.line,
            ViolationKind::BrokenLink,
            format!("broken link -> {reported}"),
            link.as_markdown(),
        ));
    }

    violations
}

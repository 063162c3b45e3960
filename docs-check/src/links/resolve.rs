//! Candidate path generation for link targets.
//!
//! `resolve_candidates` is pure apart from the directory question it asks
//! through [`PathProbe`]. The link checker decides broken/not broken with the
//! same probe.

use std::path::{Component, Path, PathBuf};

use super::extract::{is_anchor_only, is_external_link};

/// Index file tried inside a directory target.
pub const INDEX_FILE: &str = "README.md";

/// Extensions tried, in order, for targets written without one.
pub const GUESSED_EXTENSIONS: &[&str] = &["md", "yaml", "json"];

/// Filesystem questions the resolver and link checker need answered.
pub trait PathProbe {
    /// Whether anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;
    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// [`PathProbe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Outcome of probing every candidate of one link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkResolution {
    pub candidates: Vec<PathBuf>,
    /// First candidate that exists, if any.
    pub resolved: Option<PathBuf>,
}

impl LinkResolution {
    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.resolved.is_none()
    }

    /// Path shown in reports: the existing candidate when there is one,
    /// otherwise the first guess.
    #[must_use]
    pub fn reported_path(&self) -> Option<&Path> {
        self.resolved
            .as_deref()
            .or_else(|| self.candidates.first().map(PathBuf::as_path))
    }
}

/// Drop the `#fragment` and then the `?query` part of a target.
#[must_use]
pub fn strip_fragment_and_query(target: &str) -> &str {
    let target = target.split_once('#').map_or(target, |(path, _)| path);
    target.split_once('?').map_or(target, |(path, _)| path)
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` at the top of a relative path is kept; `..` at the filesystem root is
/// dropped.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        PathBuf::from(".")
    } else {
        out.iter().collect()
    }
}

fn with_extension_appended(path: &Path, ext: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(".");
    raw.push(ext);
    PathBuf::from(raw)
}

/// Ordered, deduplicated candidate paths for a link target.
///
/// - `source_dir`: directory containing the referencing file
/// - `project_root`: base for targets starting with `/`
///
/// Returns an empty list for external, anchor-only and blank targets.
/// Candidates, in order: the base path, `<base>/README.md` when the base is a
/// directory, and for every candidate without an extension the `.md`,
/// `.yaml` and `.json` variants ahead of the bare form.
#[must_use]
pub fn resolve_candidates(
    source_dir: &Path,
    target: &str,
    project_root: &Path,
    probe: &dyn PathProbe,
) -> Vec<PathBuf> {
    let target = target.trim();
    if target.is_empty() || is_anchor_only(target) || is_external_link(target) {
        return Vec::new();
    }

    let target = strip_fragment_and_query(target);
    let base = match target.strip_prefix('/') {
        Some(rooted) => normalize_lexically(&project_root.join(rooted.trim_start_matches('/'))),
        None => normalize_lexically(&source_dir.join(target)),
    };

    let mut gathered = vec![base.clone()];
    if probe.is_dir(&base) {
        gathered.push(base.join(INDEX_FILE));
    }

    let mut candidates: Vec<PathBuf> = Vec::with_capacity(gathered.len() * 4);
    for candidate in gathered {
        if candidate.extension().is_none() {
            for ext in GUESSED_EXTENSIONS {
                candidates.push(with_extension_appended(&candidate, ext));
            }
        }
        candidates.push(candidate);
    }

    let mut deduped: Vec<PathBuf> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !deduped.contains(&candidate) {
            deduped.push(candidate);
        }
    }
    deduped
}

/// Resolve a target and probe every candidate for existence.
#[must_use]
pub fn resolve_link(
    source_dir: &Path,
    target: &str,
    project_root: &Path,
    probe: &dyn PathProbe,
) -> LinkResolution {
    let candidates = resolve_candidates(source_dir, target, project_root, probe);
    let resolved = candidates.iter().find(|c| probe.exists(c)).cloned();
    LinkResolution {
        candidates,
        resolved,
    }
}

//! Filesystem discovery and reading.
//!
//! Properties enforced here:
//! - The scan root must exist and be a directory (fatal otherwise)
//! - Walk order is sorted by file name, so reports are reproducible
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Resolved paths are checked to remain within the scan root
//! - Device files, pipes, and sockets are skipped
//! - Bounded reads enforce `max_file_size`

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::error::{CheckError, Violation, ViolationKind};
use crate::links::resolve::normalize_lexically;

/// Directories never entered.
pub const SKIP_DIRS: &[&str] = &[".git", "node_modules"];

/// Message for files that are not valid UTF-8.
pub const NON_UTF8_MESSAGE: &str = "binary or non-UTF-8 file";

/// Which files a check looks at.
#[derive(Debug, Clone, Copy)]
pub enum FileFilter<'a> {
    /// Files whose lowercased name ends with one of these extensions.
    Extensions(&'a [String]),
    /// Every regular file.
    AllFiles,
}

impl FileFilter<'_> {
    fn matches(&self, path: &Path) -> bool {
        match self {
            Self::AllFiles => true,
            Self::Extensions(exts) => path.file_name().is_some_and(|name| {
                let name = name.to_string_lossy().to_lowercase();
                exts.iter().any(|ext| name.ends_with(ext.as_str()))
            }),
        }
    }
}

/// A validated scan root.
#[derive(Debug, Clone)]
pub struct ScanRoot {
    /// Absolute, lexically normalized root directory.
    pub path: PathBuf,
    /// Base for `/`-rooted link targets: the parent of the scan root.
    pub project_root: PathBuf,
    /// Symlink-free form of `path`, for the boundary check.
    pub canonical: PathBuf,
}

impl ScanRoot {
    /// Validate `root` and make it absolute.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be made absolute or canonical, does
    /// not exist, or is not a directory.
    pub fn open(root: &Path) -> Result<Self, CheckError> {
        let absolute = std::path::absolute(root).map_err(|source| CheckError::RootUnresolvable {
            path: root.to_owned(),
            source,
        })?;
        let path = normalize_lexically(&absolute);

        if !path.exists() {
            return Err(CheckError::RootNotFound(path));
        }
        if !path.is_dir() {
            return Err(CheckError::RootNotADirectory(path));
        }

        let canonical = path
            .canonicalize()
            .map_err(|source| CheckError::RootUnresolvable {
                path: path.clone(),
                source,
            })?;
        let project_root = path.parent().map_or_else(|| path.clone(), Path::to_path_buf);
        Ok(Self {
            path,
            project_root,
            canonical,
        })
    }

    /// Path relative to the root, for report keys.
    #[must_use]
    pub fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.path)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}

/// A file selected for checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path on disk (under the absolute root)
    pub path: PathBuf,
    /// Path relative to the scan root
    pub rel_path: PathBuf,
}

/// Result of a walk: the files to check plus file-level problems met on the way.
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<SourceFile>,
    pub errors: Vec<(PathBuf, Violation)>,
}

/// What to walk and what to leave out.
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions<'a> {
    pub filter: FileFilter<'a>,
    /// Skip the archive subtree directly under the root.
    pub skip_archive: bool,
}

/// Result of attempting to read a file for scanning.
pub enum ReadOutcome {
    /// File was read successfully; contains the UTF-8 content.
    Ok(String),
    /// File could not be read; contains the file-level violation.
    Err(Violation),
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<Pattern>, CheckError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| CheckError::InvalidExcludePattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// Check if a relative path or its file name matches any exclude pattern.
fn matches_exclude(rel_path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = rel_path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || rel_path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Returns `true` if the entry should be **entered** (for `WalkDir::filter_entry`).
fn is_walkable(entry: &walkdir::DirEntry, archive_dir: Option<&str>) -> bool {
    if !entry.file_type().is_dir() {
        return true;
    }
    let Some(name) = entry.file_name().to_str() else {
        return true;
    };
    if SKIP_DIRS.contains(&name) {
        return false;
    }
    !(entry.depth() == 1 && archive_dir == Some(name))
}

fn unreadable(message: String) -> Violation {
    Violation::file_level(ViolationKind::UnreadableFile, message)
}

/// Walk the scan root and collect the files a check should read.
///
/// Walk errors (permission denied, loops) and paths escaping the root are
/// returned as file-level violations and never silently dropped.
///
/// # Errors
///
/// Returns an error if an exclude pattern is not a valid glob.
pub fn find_files(
    root: &ScanRoot,
    config: &ScanConfig,
    options: WalkOptions<'_>,
) -> Result<Discovery, CheckError> {
    let exclude_patterns = compile_excludes(&config.exclude)?;
    let archive_dir = options.skip_archive.then_some(config.archive_dir.as_str());
    let mut discovery = Discovery::default();

    for entry_result in WalkDir::new(&root.path)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| is_walkable(e, archive_dir))
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| root.path.clone(), Path::to_path_buf);
                discovery.errors.push((
                    root.relative(&path),
                    unreadable(format!("directory traversal error: {walk_err}")),
                ));
                continue;
            }
        };

        // Follows symlinks only when the walker does; also drops devices,
        // pipes and sockets.
        if !entry.file_type().is_file() {
            continue;
        }
        let file_path = entry.path();

        let rel_path = root.relative(file_path);
        if !options.filter.matches(file_path) || matches_exclude(&rel_path, &exclude_patterns) {
            continue;
        }

        match file_path.canonicalize() {
            Ok(canonical) if !canonical.starts_with(&root.canonical) => {
                discovery.errors.push((
                    rel_path,
                    unreadable(format!(
                        "path resolves outside the docs root: {}",
                        canonical.display()
                    )),
                ));
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                discovery
                    .errors
                    .push((rel_path, unreadable(format!("error reading file: {e}"))));
                continue;
            }
        }

        discovery.files.push(SourceFile {
            path: file_path.to_path_buf(),
            rel_path,
        });
    }

    Ok(discovery)
}

/// Read a file with a bounded read, enforcing `max_file_size`.
///
/// Returns `ReadOutcome::Err` if the file is too large, cannot be read, or is
/// not valid UTF-8.
#[must_use]
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> ReadOutcome {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => return ReadOutcome::Err(unreadable(format!("error reading file: {e}"))),
    };

    // One byte past the limit tells an oversized file apart from an exact fit.
    let mut buffer = Vec::new();
    if let Err(e) = file
        .take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
    {
        return ReadOutcome::Err(unreadable(format!("error reading file: {e}")));
    }

    if buffer.len() as u64 > max_file_size {
        return ReadOutcome::Err(unreadable(format!(
            "file exceeds maximum size of {max_file_size} bytes"
        )));
    }

    match String::from_utf8(buffer) {
        Ok(content) => ReadOutcome::Ok(content),
        Err(_) => ReadOutcome::Err(unreadable(NON_UTF8_MESSAGE.to_owned())),
    }
}

//! # docs-check
//!
//! Integrity checks for Markdown documentation trees, meant to run as a
//! pre-merge gate:
//!
//! - **fences**: every fenced code block has a language/path tag and is closed
//! - **links**: every internal `[text](target)` link resolves to a file
//! - **filenames**: names follow `lowercase_with_underscores.md`, `.yaml`
//! - **emoji**: no emoji characters in prose
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docs_check::{CheckKind, ScanConfig, run_check};
//!
//! let config = ScanConfig::for_root("docs");
//! let report = run_check(CheckKind::Fences, &config).unwrap();
//! println!("Files scanned: {}", report.scanned_files);
//! println!("Violations: {}", report.violation_count());
//! println!("OK: {}", report.ok);
//! ```

mod config;
pub mod emoji;
mod error;
pub mod fence;
pub mod links;
pub mod naming;
pub mod output;
mod report;
pub mod scan;

use std::collections::BTreeMap;
use std::path::PathBuf;

pub use config::{ConfigFile, DEFAULT_ARCHIVE_DIR, DEFAULT_ROOT, EmojiRanges, ScanConfig};
pub use error::{CheckError, Violation, ViolationKind};
pub use report::{CheckKind, CheckReport};

use links::FsProbe;
use scan::{FileFilter, ReadOutcome, ScanRoot, SourceFile, WalkOptions, find_files, read_file_bounded};

/// Run one check over the tree rooted at `config.root`.
///
/// # Errors
///
/// Returns an error if the root does not exist or is not a directory, or if
/// an exclude pattern is invalid. Per-file problems (unreadable files,
/// decode failures) are reported as violations and never abort the run.
pub fn run_check(kind: CheckKind, config: &ScanConfig) -> Result<CheckReport, CheckError> {
    let root = ScanRoot::open(&config.root)?;
    tracing::debug!(check = %kind, root = %root.path.display(), "starting check");

    let filter = match kind {
        CheckKind::Filenames => FileFilter::AllFiles,
        CheckKind::Fences | CheckKind::Links | CheckKind::Emoji => {
            FileFilter::Extensions(&config.extensions)
        }
    };
    let options = WalkOptions {
        filter,
        skip_archive: kind.skips_archive() && !config.include_archive,
    };
    let discovery = find_files(&root, config, options)?;

    let mut violations: BTreeMap<PathBuf, Vec<Violation>> = BTreeMap::new();
    let mut failed_files = discovery.errors.len();
    for (path, violation) in discovery.errors {
        tracing::warn!(path = %path.display(), "{}", violation.message);
        violations.entry(path).or_default().push(violation);
    }

    let mut scanned_files: usize = 0;
    for file in &discovery.files {
        let file_violations = match kind {
            CheckKind::Filenames => naming::check_path(&file.rel_path)
                .into_iter()
                .map(|message| Violation::file_level(ViolationKind::NamingPolicy, message))
                .collect(),
            CheckKind::Fences | CheckKind::Links | CheckKind::Emoji => {
                match read_file_bounded(&file.path, config.max_file_size) {
                    ReadOutcome::Ok(content) => scan_content(kind, &content, file, &root, config),
                    ReadOutcome::Err(violation) => {
                        tracing::warn!(path = %file.rel_path.display(), "{}", violation.message);
                        failed_files += 1;
                        violations
                            .entry(file.rel_path.clone())
                            .or_default()
                            .push(violation);
                        continue;
                    }
                }
            }
        };

        scanned_files += 1;
        tracing::debug!(
            path = %file.rel_path.display(),
            violations = file_violations.len(),
            "checked file"
        );
        if !file_violations.is_empty() {
            violations
                .entry(file.rel_path.clone())
                .or_default()
                .extend(file_violations);
        }
    }

    let report = CheckReport::new(kind, scanned_files, failed_files, violations);
    tracing::info!(
        check = %kind,
        scanned = report.scanned_files,
        failed = report.failed_files,
        violations = report.violation_count(),
        "check finished"
    );
    Ok(report)
}

fn scan_content(
    kind: CheckKind,
    content: &str,
    file: &SourceFile,
    root: &ScanRoot,
    config: &ScanConfig,
) -> Vec<Violation> {
    match kind {
        CheckKind::Fences => fence::scan_fences(content),
        CheckKind::Links => {
            let source_dir = file.path.parent().unwrap_or(root.path.as_path());
            links::scan_links(content, source_dir, &root.project_root, &FsProbe)
        }
        CheckKind::Emoji => emoji::scan_emoji(content, config.emoji_ranges),
        CheckKind::Filenames => Vec::new(),
    }
}

/// Run every check, in [`CheckKind::ALL`] order.
///
/// # Errors
///
/// Returns the first fatal error; see [`run_check`].
pub fn run_all(config: &ScanConfig) -> Result<Vec<CheckReport>, CheckError> {
    CheckKind::ALL
        .into_iter()
        .map(|kind| run_check(kind, config))
        .collect()
}

/// Check fenced code blocks under `config.root`.
///
/// # Errors
///
/// See [`run_check`].
pub fn check_fences(config: &ScanConfig) -> Result<CheckReport, CheckError> {
    run_check(CheckKind::Fences, config)
}

/// Check internal links under `config.root`.
///
/// # Errors
///
/// See [`run_check`].
pub fn check_links(config: &ScanConfig) -> Result<CheckReport, CheckError> {
    run_check(CheckKind::Links, config)
}

/// Check file and directory names under `config.root`.
///
/// # Errors
///
/// See [`run_check`].
pub fn check_filenames(config: &ScanConfig) -> Result<CheckReport, CheckError> {
    run_check(CheckKind::Filenames, config)
}

/// Check for emoji characters under `config.root`.
///
/// # Errors
///
/// See [`run_check`].
pub fn check_emoji(config: &ScanConfig) -> Result<CheckReport, CheckError> {
    run_check(CheckKind::Emoji, config)
}

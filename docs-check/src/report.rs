//! Check report types.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{Violation, ViolationKind};

/// The individual checkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Fenced code blocks are tagged and closed.
    Fences,
    /// Internal links point at existing files.
    Links,
    /// File and directory names follow the naming policy.
    Filenames,
    /// No emoji characters in documentation.
    Emoji,
}

impl CheckKind {
    pub const ALL: [Self; 4] = [Self::Fences, Self::Links, Self::Filenames, Self::Emoji];

    /// Report heading.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Fences => "Code-fence language check",
            Self::Links => "Internal link check",
            Self::Filenames => "Docs filename check",
            Self::Emoji => "Emoji check",
        }
    }

    /// Whether the check leaves the archive subtree alone unless asked.
    #[must_use]
    pub fn skips_archive(self) -> bool {
        matches!(self, Self::Emoji)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fences => "fences",
            Self::Links => "links",
            Self::Filenames => "filenames",
            Self::Emoji => "emoji",
        };
        f.write_str(name)
    }
}

/// Result of one check run.
///
/// `violations` is keyed by path relative to the scan root; the map keeps
/// paths sorted and each list keeps discovery order.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct CheckReport {
    pub check: CheckKind,
    /// Number of files read and checked.
    pub scanned_files: usize,
    /// Number of files that could not be read or reached.
    pub failed_files: usize,
    /// Whether no violations of any kind were found.
    pub ok: bool,
    /// Keys are written lossily as UTF-8 strings in JSON.
    #[serde(serialize_with = "serialize_path_keys")]
    pub violations: BTreeMap<PathBuf, Vec<Violation>>,
}

fn serialize_path_keys<S: Serializer>(
    violations: &BTreeMap<PathBuf, Vec<Violation>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(violations.len()))?;
    for (path, list) in violations {
        map.serialize_entry(&path.to_string_lossy(), list)?;
    }
    map.end()
}

impl CheckReport {
    #[must_use]
    pub fn new(
        check: CheckKind,
        scanned_files: usize,
        failed_files: usize,
        violations: BTreeMap<PathBuf, Vec<Violation>>,
    ) -> Self {
        let ok = violations.values().all(Vec::is_empty);
        Self {
            check,
            scanned_files,
            failed_files,
            ok,
            violations,
        }
    }

    /// Total number of violations across all files.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.values().map(Vec::len).sum()
    }

    /// Number of files with at least one violation.
    #[must_use]
    pub fn files_with_violations(&self) -> usize {
        self.violations.values().filter(|v| !v.is_empty()).count()
    }

    #[must_use]
    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.violations.values().flatten().any(|v| v.kind == kind)
    }
}

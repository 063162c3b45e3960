//! Error and violation types for documentation checks.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A condition that aborts a whole check run.
///
/// Anything that only affects a single file is reported as a [`Violation`]
/// instead, so one bad file never hides issues in the rest of the tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CheckError {
    #[error("docs root not found: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("docs root is not a directory: {}", .0.display())]
    RootNotADirectory(PathBuf),
    #[error("failed to resolve docs root {}: {source}", .path.display())]
    RootUnresolvable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid exclude glob pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },
}

/// The kind of defect a violation describes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ViolationKind {
    /// An opening fence without a language or path tag.
    MissingFenceTag,
    /// A fenced block still open at end of file.
    UnclosedFence,
    /// A link whose target resolves to nothing on disk.
    BrokenLink,
    /// A file or directory name that breaks the naming policy.
    NamingPolicy,
    /// Emoji characters in documentation text.
    Emoji,
    /// The file could not be read, decoded, or reached during traversal.
    UnreadableFile,
}

/// A single defect found in one file.
///
/// `line` is 1-indexed; `0` marks a whole-file condition.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Violation {
    pub line: usize,
    pub kind: ViolationKind,
    /// Human-readable description
    pub message: String,
    /// The offending line or link, empty for whole-file conditions
    pub context: String,
}

impl Violation {
    #[must_use]
    pub fn at_line(line: usize, kind: ViolationKind, message: String, context: String) -> Self {
        Self {
            line,
            kind,
            message,
            context,
        }
    }

    #[must_use]
    pub fn file_level(kind: ViolationKind, message: String) -> Self {
        Self {
            line: 0,
            kind,
            message,
            context: String::new(),
        }
    }

    #[must_use]
    pub fn is_file_level(&self) -> bool {
        self.line == 0
    }

    /// Format the violation for one line of human-readable output.
    ///
    /// Line-level: `Line {line}: {message}`, plus `: '{context}'` when present.
    /// File-level: `[warning] {message}` for unreadable files, otherwise just the message.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        if self.is_file_level() {
            if self.kind == ViolationKind::UnreadableFile {
                format!("[warning] {}", self.message)
            } else {
                self.message.clone()
            }
        } else if self.context.is_empty() {
            format!("Line {}: {}", self.line, self.message)
        } else {
            format!("Line {}: {}: '{}'", self.line, self.message, self.context)
        }
    }
}

//! Configuration types for documentation checks.
//!
//! `ScanConfig` is what the checkers consume. `ConfigFile` is the optional
//! on-disk YAML layer the CLI merges on top of the defaults before applying
//! its own flags.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CheckError;

/// Default scan root, relative to the working directory of the caller.
pub const DEFAULT_ROOT: &str = "docs";

/// Default archive subtree (directly under the root).
pub const DEFAULT_ARCHIVE_DIR: &str = "archive";

/// Which code point ranges count as emoji.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum EmojiRanges {
    /// Pictograph, emoticon, transport and flag blocks only. Leaves check
    /// marks, box drawing and technical symbols alone.
    #[default]
    Relaxed,
    /// Adds dingbats, enclosed alphanumerics, misc symbols and misc technical.
    Strict,
}

/// Options shared by every checker.
///
/// NOTE: `root` is resolved by the caller's working directory; the library
/// never guesses a docs location relative to itself.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ScanConfig {
    /// Directory to scan (default: `docs`).
    pub root: PathBuf,
    /// File extensions (with leading dot, lowercase) fed to the content
    /// checkers (default: `.md`). The filename check ignores this and walks
    /// every file.
    pub extensions: Vec<String>,
    /// Exclude patterns (glob format), matched against the root-relative path
    /// and the file name.
    pub exclude: Vec<String>,
    /// Directory name under the root treated as archived documentation.
    pub archive_dir: String,
    /// Scan the archive subtree in checks that skip it by default.
    pub include_archive: bool,
    /// Emoji detection ranges.
    pub emoji_ranges: EmojiRanges,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            extensions: vec![".md".to_owned()],
            exclude: Vec::new(),
            archive_dir: DEFAULT_ARCHIVE_DIR.to_owned(),
            include_archive: false,
            emoji_ranges: EmojiRanges::Relaxed,
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
        }
    }
}

impl ScanConfig {
    /// Config for scanning `root` with every other option at its default.
    #[must_use]
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Replace the extension list, normalizing each entry to a lowercase,
    /// dot-prefixed form. Empty entries are dropped.
    pub fn set_extensions<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();
    }
}

fn normalize_extension(raw: &str) -> Option<String> {
    let ext = raw.trim().to_lowercase();
    if ext.is_empty() || ext == "." {
        return None;
    }
    if ext.starts_with('.') {
        Some(ext)
    } else {
        Some(format!(".{ext}"))
    }
}

/// Optional YAML configuration file.
///
/// Every field is optional; unset fields leave the current value alone.
///
/// ```yaml
/// root: docs
/// extensions: [.md, .markdown]
/// exclude: ["generated/*"]
/// include_archive: false
/// emoji_ranges: strict
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct ConfigFile {
    pub root: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub archive_dir: Option<String>,
    pub include_archive: Option<bool>,
    pub emoji_ranges: Option<EmojiRanges>,
    pub max_file_size: Option<u64>,
    pub follow_links: Option<bool>,
    pub max_depth: Option<usize>,
}

impl ConfigFile {
    /// Parse a config file from YAML text. `origin` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::ConfigParse`] if the text is not a valid config.
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self, CheckError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(content).map_err(|e| CheckError::ConfigParse {
            path: origin.to_owned(),
            message: e.to_string(),
        })
    }

    /// Read and parse a config file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::ConfigRead`] if the file cannot be read and
    /// [`CheckError::ConfigParse`] if it is not a valid config.
    pub fn load(path: &Path) -> Result<Self, CheckError> {
        let content = std::fs::read_to_string(path).map_err(|source| CheckError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::from_yaml_str(&content, path)
    }

    /// Layer this file's values over `config`.
    pub fn apply_to(&self, config: &mut ScanConfig) {
        if let Some(root) = &self.root {
            config.root.clone_from(root);
        }
        if let Some(extensions) = &self.extensions {
            config.set_extensions(extensions);
        }
        if let Some(exclude) = &self.exclude {
            config.exclude.clone_from(exclude);
        }
        if let Some(archive_dir) = &self.archive_dir {
            config.archive_dir.clone_from(archive_dir);
        }
        if let Some(include_archive) = self.include_archive {
            config.include_archive = include_archive;
        }
        if let Some(emoji_ranges) = self.emoji_ranges {
            config.emoji_ranges = emoji_ranges;
        }
        if let Some(max_file_size) = self.max_file_size {
            config.max_file_size = max_file_size;
        }
        if let Some(follow_links) = self.follow_links {
            config.follow_links = follow_links;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
    }
}

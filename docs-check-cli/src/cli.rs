use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use docs_check::{CheckKind, CheckReport, ConfigFile, EmojiRanges, ScanConfig, output};

#[derive(Parser, Debug)]
#[command(
    name = "docs-check",
    version,
    about = "Pre-merge integrity checks for Markdown documentation trees",
    long_about = "Scans a documentation tree for untagged or unclosed code fences, broken \
                  internal links, filenames that break the naming policy, and emoji.\n\n\
                  Exit codes: 0 = no violations, 1 = violations found, 2 = fatal error."
)]
pub struct Cli {
    /// Log more (-v info, -vv debug) and add hints to the report
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// YAML config file; command-line flags override its values
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Options shared by every check.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Path to the docs directory [default: docs]
    #[arg(value_name = "ROOT", conflicts_with = "root")]
    pub root_arg: Option<PathBuf>,

    /// Path to the docs directory [default: docs]
    #[arg(long = "root", alias = "docs-root", value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Comma-separated file extensions to scan [default: .md]
    #[arg(long, value_delimiter = ',', value_name = "EXTS")]
    pub extensions: Option<Vec<String>>,

    /// Glob pattern to exclude (repeatable), matched against root-relative paths and file names
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Maximum directory depth to walk
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Follow symbolic links (files resolving outside the root are still rejected)
    #[arg(long)]
    pub follow_links: bool,
}

/// Options of the emoji check.
#[derive(Args, Debug, Clone, Default)]
pub struct EmojiArgs {
    /// Include the archive/ subtree
    #[arg(long)]
    pub include_archive: bool,

    /// Also flag dingbats, check marks and technical symbols
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that fenced code blocks carry a language/path tag and are closed
    Fences {
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Check that internal Markdown links resolve to files
    Links {
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Check file and directory names against the naming policy
    Filenames {
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Check for emoji characters
    Emoji {
        #[command(flatten)]
        scan: ScanArgs,
        #[command(flatten)]
        emoji: EmojiArgs,
    },
    /// Run every check
    All {
        #[command(flatten)]
        scan: ScanArgs,
        #[command(flatten)]
        emoji: EmojiArgs,
    },
}

impl Commands {
    fn parts(&self) -> (Option<CheckKind>, &ScanArgs, Option<&EmojiArgs>) {
        match self {
            Self::Fences { scan } => (Some(CheckKind::Fences), scan, None),
            Self::Links { scan } => (Some(CheckKind::Links), scan, None),
            Self::Filenames { scan } => (Some(CheckKind::Filenames), scan, None),
            Self::Emoji { scan, emoji } => (Some(CheckKind::Emoji), scan, Some(emoji)),
            Self::All { scan, emoji } => (None, scan, Some(emoji)),
        }
    }
}

/// Layer defaults, the config file, then flags.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub fn build_config(
    config_file: Option<&Path>,
    scan: &ScanArgs,
    emoji: Option<&EmojiArgs>,
) -> Result<ScanConfig> {
    let mut config = ScanConfig::default();

    if let Some(path) = config_file {
        ConfigFile::load(path)?.apply_to(&mut config);
    }
    if let Some(root) = scan.root.as_ref().or(scan.root_arg.as_ref()) {
        config.root.clone_from(root);
    }
    if let Some(extensions) = &scan.extensions {
        config.set_extensions(extensions);
    }
    config.exclude.extend(scan.exclude.iter().cloned());
    if let Some(max_depth) = scan.max_depth {
        config.max_depth = max_depth;
    }
    if scan.follow_links {
        config.follow_links = true;
    }
    if let Some(emoji) = emoji {
        if emoji.include_archive {
            config.include_archive = true;
        }
        if emoji.strict {
            config.emoji_ranges = EmojiRanges::Strict;
        }
    }

    Ok(config)
}

fn write_reports(
    reports: &[CheckReport],
    format: OutputFormat,
    verbose: bool,
    single: bool,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json if single => {
            if let Some(report) = reports.first() {
                output::write_json(report, &mut out)?;
            }
        }
        OutputFormat::Json => output::write_json(reports, &mut out)?,
        OutputFormat::Human => {
            for (idx, report) in reports.iter().enumerate() {
                if idx > 0 {
                    writeln!(out)?;
                }
                output::write_human(report, verbose, &mut out)?;
            }
            if !single {
                let failed = reports.iter().filter(|r| !r.ok).count();
                writeln!(out)?;
                if failed == 0 {
                    writeln!(out, "{}", "All checks passed.".green().bold())?;
                } else {
                    let line = format!("{failed} of {} check(s) failed.", reports.len());
                    writeln!(out, "{}", line.red().bold())?;
                }
            }
        }
    }

    out.flush().context("failed to flush report")?;
    Ok(())
}

/// Run the selected check(s) and print the report.
///
/// Returns `Ok(true)` when no violations were found.
///
/// # Errors
///
/// Returns an error on fatal conditions: missing root, invalid config or
/// exclude pattern, or a failure to write the report.
pub fn run(cli: &Cli) -> Result<bool> {
    let (kind, scan, emoji) = cli.command.parts();
    let config = build_config(cli.config.as_deref(), scan, emoji)?;
    tracing::info!(root = %config.root.display(), "scanning documentation");

    let reports = match kind {
        Some(kind) => vec![docs_check::run_check(kind, &config)?],
        None => docs_check::run_all(&config)?,
    };

    write_reports(&reports, cli.format, cli.verbose > 0, kind.is_some())?;
    Ok(reports.iter().all(|r| r.ok))
}

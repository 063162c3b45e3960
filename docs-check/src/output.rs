//! Shared output formatting for check reports.
//!
//! Provides JSON and plain-text formatters for `CheckReport`.
//! Color/terminal formatting belongs to the CLI layer.

use std::io::Write;

use serde::Serialize;

use crate::error::{Violation, ViolationKind};
use crate::report::{CheckKind, CheckReport};

/// Format any report value (one report or a list of them) as JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<T: Serialize + ?Sized>(value: &T, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

fn hint(violation: &Violation) -> Option<&'static str> {
    match violation.kind {
        ViolationKind::MissingFenceTag => Some(
            "Hint: add a language or path after the opening fence, e.g. ```rust or ```/dev/null/example.rs#L1-3",
        ),
        ViolationKind::UnclosedFence => {
            Some("Hint: close the block with a fence of the same character (``` or ~~~)")
        }
        ViolationKind::BrokenLink => {
            Some("Hint: fix the relative path, or link to a directory that contains README.md")
        }
        ViolationKind::NamingPolicy | ViolationKind::Emoji | ViolationKind::UnreadableFile => None,
    }
}

fn write_violation(
    violation: &Violation,
    verbose: bool,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    if violation.kind == ViolationKind::NamingPolicy {
        writeln!(writer, "    - {}", violation.message)?;
        return Ok(());
    }

    writeln!(writer, "  {}", violation.format_human_readable())?;
    if !verbose || violation.is_file_level() {
        return Ok(());
    }
    if violation.kind == ViolationKind::Emoji {
        writeln!(writer, "    {}", violation.context)?;
    } else if let Some(hint) = hint(violation) {
        writeln!(writer, "    {hint}")?;
    }
    Ok(())
}

/// Format a `CheckReport` as human-readable plain text.
///
/// Paths are printed in sorted order; `verbose` adds hints and line context.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(
    report: &CheckReport,
    verbose: bool,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    let title = report.check.title();
    if report.ok {
        writeln!(
            writer,
            "{title}: OK - no issues found ({} file(s) checked).",
            report.scanned_files
        )?;
        return Ok(());
    }

    writeln!(
        writer,
        "{title}: {} issue(s) across {} file(s).",
        report.violation_count(),
        report.files_with_violations()
    )?;
    writeln!(writer)?;

    for (path, violations) in &report.violations {
        if violations.is_empty() {
            continue;
        }
        writeln!(writer, "{}:", path.display())?;
        for violation in violations {
            write_violation(violation, verbose, writer)?;
        }
        writeln!(writer)?;
    }

    if report.check == CheckKind::Filenames && report.has_kind(ViolationKind::NamingPolicy) {
        writeln!(
            writer,
            "Summary: rename files to follow 'lowercase_with_underscores.md' and use '.yaml' \
             for YAML files. Exception: 'README.md' is allowed."
        )?;
    }
    if report.failed_files > 0 {
        writeln!(
            writer,
            "{} file(s) could not be checked; treat this as a failure.",
            report.failed_files
        )?;
    }

    Ok(())
}

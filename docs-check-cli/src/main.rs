// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: reports go to stdout, fatal errors to stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

/// No violations.
const EXIT_OK: u8 = 0;
/// At least one violation.
const EXIT_VIOLATIONS: u8 = 1;
/// Missing root, bad config or pattern, or a report write failure.
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    match cli::run(&cli) {
        Ok(true) => ExitCode::from(EXIT_OK),
        Ok(false) => ExitCode::from(EXIT_VIOLATIONS),
        Err(e) => {
            eprintln!("{} {e:#}", "ERROR:".red().bold());
            ExitCode::from(EXIT_FATAL)
        }
    }
}

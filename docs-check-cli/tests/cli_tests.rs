#![allow(clippy::unwrap_used)]
//! End-to-end tests for the `docs-check` binary.
//!
//! These tests cover:
//! - Exit code 0 on a clean tree
//! - Exit code 1 with a human report on stdout
//! - Exit code 2 on a missing root or a bad exclude pattern
//! - JSON output for a single check and for `all`
//! - Config file layering
//! - Byte-identical output across runs

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn docs_tree() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let docs = tmp.path().join("docs");
    fs::create_dir(&docs).unwrap();
    (tmp, docs)
}

fn docs_check(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docs-check"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_clean_tree_exits_zero() {
    let (_tmp, docs) = docs_tree();
    write(&docs, "README.md", "# Docs\n\n```bash\nmake\n```\n");

    let output = docs_check(&["fences", "--root", docs.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Code-fence language check: OK - no issues found (1 file(s) checked).\n"
    );
}

#[test]
fn test_violation_exits_one() {
    let (_tmp, docs) = docs_tree();
    write(&docs, "a.md", "intro\n```\nx\n```\n");

    let output = docs_check(&["fences", docs.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("1 issue(s) across 1 file(s)"), "got: {out}");
    assert!(out.contains("a.md:\n  Line 2: missing language/path tag: '```'"));
}

#[test]
fn test_missing_root_exits_two() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope");

    for check in ["fences", "links", "filenames", "emoji", "all"] {
        let output = docs_check(&[check, "--root", missing.to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(2), "{check}");
        assert!(stdout(&output).is_empty());
        let err = stderr(&output);
        assert!(err.contains("ERROR:"), "got: {err}");
        assert!(err.contains("docs root not found"), "got: {err}");
    }
}

#[test]
fn test_invalid_exclude_exits_two() {
    let (_tmp, docs) = docs_tree();
    write(&docs, "a.md", "ok\n");

    let output = docs_check(&["links", "--root", docs.to_str().unwrap(), "--exclude", "[oops"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid exclude glob pattern '[oops'"));
}

#[test]
fn test_json_single_check() {
    let (_tmp, docs) = docs_tree();
    write(&docs, "guide.md", "see [setup](setup.md)\n");

    let output = docs_check(&["links", "--root", docs.to_str().unwrap(), "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["check"], "links");
    assert_eq!(json["ok"], false);
    assert_eq!(json["violations"]["guide.md"][0]["kind"], "broken_link");
    assert_eq!(json["violations"]["guide.md"][0]["line"], 1);
}

#[test]
fn test_all_runs_every_check() {
    let (_tmp, docs) = docs_tree();
    write(&docs, "Bad-Name.md", "Launch \u{1F680}\n");

    let output = docs_check(&["all", "--root", docs.to_str().unwrap(), "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let summary: Vec<(String, bool)> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| (r["check"].as_str().unwrap().to_owned(), r["ok"].as_bool().unwrap()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("fences".to_owned(), true),
            ("links".to_owned(), true),
            ("filenames".to_owned(), false),
            ("emoji".to_owned(), false),
        ]
    );

    let human = docs_check(&["all", "--root", docs.to_str().unwrap()]);
    assert!(stdout(&human).ends_with("2 of 4 check(s) failed.\n"));
}

#[test]
fn test_config_file_and_flag_override() {
    let (tmp, docs) = docs_tree();
    write(&docs, "index.md", "Done \u{2705}\n");
    let config = tmp.path().join("docs-check.yaml");
    fs::write(
        &config,
        format!("root: {}\nemoji_ranges: strict\n", docs.display()),
    )
    .unwrap();

    let strict = docs_check(&["emoji", "--config", config.to_str().unwrap()]);
    assert_eq!(strict.status.code(), Some(1));
    assert!(stdout(&strict).contains("emoji U+2705"));

    let elsewhere = tmp.path().join("elsewhere");
    fs::create_dir(&elsewhere).unwrap();
    let overridden = docs_check(&[
        "emoji",
        "--config",
        config.to_str().unwrap(),
        "--root",
        elsewhere.to_str().unwrap(),
    ]);
    assert_eq!(overridden.status.code(), Some(0));
}

#[test]
fn test_bad_config_exits_two() {
    let (tmp, docs) = docs_tree();
    let config = tmp.path().join("docs-check.yaml");
    fs::write(&config, "rooot: docs\n").unwrap();

    let output = docs_check(&[
        "fences",
        "--root",
        docs.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid config file"));
}

#[test]
fn test_output_is_stable_across_runs() {
    let (_tmp, docs) = docs_tree();
    write(&docs, "b.md", "```\n[x](gone.md)\n");
    write(&docs, "a/c.md", "~~~\n");

    let root = docs.to_str().unwrap();
    let first = docs_check(&["all", "--root", root, "-v"]);
    let second = docs_check(&["all", "--root", root, "-v"]);
    assert_eq!(first.status.code(), Some(1));
    assert_eq!(first.stdout, second.stdout);
}

//! CLI interface tests for the mracket binary: argument handling, exit codes,
//! and the output JSON shape, driven end-to-end through a fake `racket` on
//! `$PATH` rather than a real DrRacket installation.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mracket"))
}

/// Writes a stub `racket` executable into `dir` that always reports two
/// passing tests, and returns `dir` prepended to `$PATH`.
fn fake_racket_path(dir: &std::path::Path) -> String {
    let script = dir.join("racket");
    std::fs::write(&script, "#!/bin/sh\necho 'Both tests passed!'\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    let existing = std::env::var("PATH").unwrap_or_default();
    format!("{}:{existing}", dir.display())
}

/// Writes a stub `racket` executable into `dir` that fails exactly one test
/// when its input file's text contains `killer_marker`, and passes both tests
/// otherwise. Returns `dir` prepended to `$PATH`.
///
/// Unlike [`fake_racket_path`], this stub actually inspects which program it
/// was handed, so a run through it genuinely distinguishes a killed mutant
/// from a survived one rather than asserting it by construction.
fn content_sensitive_racket_path(dir: &std::path::Path, killer_marker: &str) -> String {
    let script = dir.join("racket");
    std::fs::write(
        &script,
        format!(
            "#!/bin/sh\nif grep -qF '{killer_marker}' \"$1\"; then\n  echo '1 of the 2 tests failed.'\nelse\n  echo 'Both tests passed!'\nfi\n"
        ),
    )
    .unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    let existing = std::env::var("PATH").unwrap_or_default();
    format!("{}:{existing}", dir.display())
}

#[test]
fn missing_input_file_exits_1() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("cfg.json");
    std::fs::write(&config, r#"{"mutators":{"general":[]}}"#).unwrap();

    Command::new(bin())
        .arg(temp.path().join("nope.rkt"))
        .arg("-c")
        .arg(&config)
        .assert()
        .code(1);
}

#[test]
fn missing_drracket_prefix_is_a_reported_failure_not_a_crash() {
    // Per-file runner failures (unlike missing input / existing output) are
    // surfaced as a failure-shaped report, not a nonzero exit: the CLI ran
    // successfully, it's the program under test that didn't qualify.
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("prog.rkt");
    std::fs::write(&input, "#lang racket\n(+ 1 1)").unwrap();
    let config = temp.path().join("cfg.json");
    std::fs::write(&config, r#"{"mutators":{"general":[]}}"#).unwrap();
    let output = temp.path().join("out.json");

    let path = fake_racket_path(temp.path());
    Command::new(bin())
        .arg(&input)
        .arg("-c")
        .arg(&config)
        .arg("-o")
        .arg(&output)
        .env("PATH", path)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(predicate::str::contains("\"execution-succeeded\": false").eval(&contents));
    assert!(predicate::str::contains("DrRacket").eval(&contents));
}

#[test]
fn refuses_to_overwrite_existing_output_without_force() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("prog.rkt");
    std::fs::write(
        &input,
        ";; The first three lines of this file were inserted by DrRacket.\n;; line2\n;; line3\n#lang racket\n(+ 1 1)",
    )
    .unwrap();
    let config = temp.path().join("cfg.json");
    std::fs::write(&config, r#"{"mutators":{"general":[]}}"#).unwrap();
    let output = temp.path().join("out.json");
    std::fs::write(&output, "{}").unwrap();

    Command::new(bin())
        .arg(&input)
        .arg("-c")
        .arg(&config)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1);
}

#[test]
fn successful_run_writes_output_json() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("prog.rkt");
    std::fs::write(
        &input,
        ";; The first three lines of this file were inserted by DrRacket.\n;; line2\n;; line3\n#lang racket\n(+ 1 1)",
    )
    .unwrap();
    let config = temp.path().join("cfg.json");
    std::fs::write(
        &config,
        r#"{"mutators":{"general":[{"type":"procedure replacement","replacements":{"+":["-"]}}]}}"#,
    )
    .unwrap();
    let output = temp.path().join("out.json");

    let path = fake_racket_path(temp.path());
    Command::new(bin())
        .arg(&input)
        .arg("-c")
        .arg(&config)
        .arg("-o")
        .arg(&output)
        .env("PATH", path)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(predicate::str::contains("\"execution-succeeded\": true").eval(&contents));
}

#[test]
fn end_to_end_scores_exactly_one_killed_mutant() {
    // Mirrors the spec's end-to-end scoring scenario: two mutation sites,
    // exactly one of which is sensitive to the `+ -> -` mutation. Driven
    // through the real scheduler/InterpreterProcess pipeline (not a
    // hand-built MutantOutput), with a stub interpreter that only reports a
    // failure for the mutant whose source contains the "sensitive" call.
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("score-2.rkt");
    std::fs::write(
        &input,
        ";; The first three lines of this file were inserted by DrRacket.\n;; line2\n;; line3\n#lang racket\n(+ 10 1)\n(+ 20 2)",
    )
    .unwrap();
    let config = temp.path().join("cfg.json");
    std::fs::write(
        &config,
        r#"{"mutators":{"general":[{"type":"procedure replacement","replacements":{"+":["-"]}}]}}"#,
    )
    .unwrap();
    let output = temp.path().join("out.json");

    // Only the mutant containing `(- 10 1)` is sensitive; `(- 20 2)` survives,
    // and the unmodified source (which contains neither) passes both tests.
    let path = content_sensitive_racket_path(temp.path(), "(- 10 1)");
    Command::new(bin())
        .arg(&input)
        .arg("-c")
        .arg(&config)
        .arg("-o")
        .arg(&output)
        .env("PATH", path)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output).unwrap();
    let report: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(report["execution-succeeded"], true);
    assert_eq!(report["summary"]["total"], 2);
    assert_eq!(report["summary"]["killed"], 1);
    assert!(report["summary"].get("execution-error").is_none());
}

#[test]
fn verbose_flag_is_accepted() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("cfg.json");
    std::fs::write(&config, r#"{"mutators":{"general":[]}}"#).unwrap();

    Command::new(bin())
        .arg(temp.path().join("nope.rkt"))
        .arg("-c")
        .arg(&config)
        .arg("-v")
        .assert()
        .code(1);
}

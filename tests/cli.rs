//! End-to-end tests for the `recpipe` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[allow(deprecated)]
fn recpipe() -> Command {
    Command::cargo_bin("recpipe").unwrap()
}

#[test]
fn test_run_success() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("numbers.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, "1\n2\n3\n4\n").unwrap();

    recpipe()
        .args(["run", input.to_str().unwrap(), output.to_str().unwrap()])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing complete"))
        .stdout(predicate::str::contains(output.to_str().unwrap()))
        .stderr(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output).unwrap(), "1\n4\n27\n16\n");
}

#[test]
fn test_run_missing_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("numbers.txt");
    let output = dir.path().join("output.txt");

    recpipe()
        .args(["run", input.to_str().unwrap(), output.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("NotFoundError"))
        .stderr(predicate::str::contains("numbers.txt"));

    assert!(!output.exists());
}

#[test]
fn test_run_parse_error_names_line() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("numbers.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, "1\nabc\n3\n").unwrap();

    let assert = recpipe()
        .args(["run", input.to_str().unwrap(), output.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ParseError: line 2: 'abc'"));

    // Exactly one diagnostic line.
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert_eq!(stderr.lines().count(), 1);
    assert!(!output.exists());
}

#[test]
fn test_run_skip_mode() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("numbers.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, "1\nabc\n3\n").unwrap();

    recpipe()
        .args([
            "run",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "--on-parse-error",
            "skip",
        ])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "Processing complete. Results written to {} (skipped 1 malformed line: 2)\n",
            output.display()
        )))
        .stderr(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output).unwrap(), "1\n27\n");
}

#[test]
fn test_run_quiet_by_default() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("numbers.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, "1\n2\n").unwrap();

    recpipe()
        .args(["run", input.to_str().unwrap(), output.to_str().unwrap()])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_run_verbose_logs_stages() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("numbers.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, "1\n2\n").unwrap();

    recpipe()
        .args(["-v", "run", input.to_str().unwrap(), output.to_str().unwrap()])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing complete"))
        .stderr(predicate::str::contains("read stage complete"))
        .stderr(predicate::str::contains("write stage complete"));
}

#[test]
fn test_run_log_level_from_env() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("numbers.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, "1\n").unwrap();

    recpipe()
        .args(["run", input.to_str().unwrap(), output.to_str().unwrap()])
        .env("RUST_LOG", "debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("reading records"));
}

#[test]
fn test_run_empty_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("numbers.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, "").unwrap();

    recpipe()
        .args(["run", input.to_str().unwrap(), output.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn test_run_unwritable_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("numbers.txt");
    fs::write(&input, "2\n").unwrap();

    recpipe()
        .args(["run", input.to_str().unwrap(), dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("IOError"));
}

#[test]
fn test_run_rejects_unknown_mode() {
    recpipe()
        .args(["run", "in.txt", "out.txt", "--on-parse-error", "ignore"])
        .assert()
        .failure();
}

#[test]
fn test_query_prints_rows() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("users.tsv"), "1\tada\n2\tgrace\n").unwrap();

    recpipe()
        .args(["query", dir.path().to_str().unwrap(), "users"])
        .assert()
        .success()
        .stdout("1\tada\n2\tgrace\n");
}

#[test]
fn test_query_unknown_table() {
    let dir = tempdir().unwrap();

    recpipe()
        .args(["query", dir.path().to_str().unwrap(), "users"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown table 'users'"));
}

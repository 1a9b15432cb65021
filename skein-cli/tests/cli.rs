use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write test file");
    path
}

fn skein() -> Command {
    Command::cargo_bin("skein").expect("binary should build")
}

#[test]
fn parse_emits_a_json_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "config.skein", "name: api\nport: 8080\n");

    skein()
        .arg("parse")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"api\"").and(predicate::str::contains("\"port\": 8080")));
}

#[test]
fn parse_supports_yaml_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "config.skein", "name: api\nport: 8080\n");

    skein()
        .arg("parse")
        .arg(&path)
        .arg("--format")
        .arg("yaml")
        .assert()
        .success()
        .stdout(predicate::str::contains("name: api"));
}

#[test]
fn parse_fails_on_broken_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "config.skein", "name api\n");

    skein()
        .arg("parse")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no ':' separator"));
}

#[test]
fn parse_rejects_unknown_formats() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "config.skein", "name: api\n");

    skein()
        .arg("parse")
        .arg(&path)
        .arg("--format")
        .arg("toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Available formats: json, yaml"));
}

#[test]
fn tokens_reflect_the_file_flavor() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "app.skein", "meta:\n  title: Home\n");

    skein()
        .arg("tokens")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tokens\"").and(predicate::str::contains("MetaKey")));
}

#[test]
fn tokens_accept_a_flavor_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "notes.skein", "meta:\n  title: Home\n");

    skein()
        .arg("tokens")
        .arg(&path)
        .arg("--flavor")
        .arg("blueprint")
        .assert()
        .success()
        .stdout(predicate::str::contains("MetaKey"));
}

#[test]
fn lint_reports_style_findings_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "config.skein", "name: api  \n");

    skein()
        .arg("lint")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("trailing whitespace").and(predicate::str::contains("skein-lint")));
}

#[test]
fn lint_exits_nonzero_on_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "config.skein", "name api\n");

    skein()
        .arg("lint")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("has no ':' separator"));
}

#[test]
fn lint_emits_json_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "config.skein", "name: api  \n");

    skein()
        .arg("lint")
        .arg(&path)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"trailing-whitespace\""));
}

#[test]
fn check_is_quiet_on_clean_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "config.skein",
        "server:\n  host: localhost\n  port: 8080\n",
    );

    skein()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn check_reports_the_first_fatal_error_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "config.skein", "a: 1\nb b\nc: 3\n");

    skein()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2").and(predicate::str::contains(">    2 | b b")));
}

#[test]
fn scrape_recovers_positions_from_a_legacy_report() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_file(dir.path(), "report.txt", "ERROR: bad value 'port' at line 2\n");
    let source = write_file(dir.path(), "config.skein", "name: api\nport: 8080\n");

    skein()
        .arg("scrape")
        .arg(&report)
        .arg("--source")
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"legacy\"").and(predicate::str::contains("\"line\": 1")));
}

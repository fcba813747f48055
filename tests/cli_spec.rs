/// Spec tests for the `listinit` binary.
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn listinit() -> Command {
    let mut cmd = Command::cargo_bin("listinit").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("LISTINIT_LOG");
    cmd
}

// ---------------------------------------------------------------------------
// rewrite
// ---------------------------------------------------------------------------

#[test]
fn rewrite_prints_to_stdout() {
    listinit()
        .arg("rewrite")
        .arg(fixture("lists.cs"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "var numbers = new List<int> { 1, 2, 3 };",
        ))
        .stdout(predicate::str::contains(
            "var one = new List<string> { \"solo\" };",
        ))
        .stdout(predicate::str::contains("var none = new List<object>();"))
        .stdout(predicate::str::contains("foreach (var n in numbers)"));
}

#[test]
fn rewrite_writes_output_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.cs");

    listinit()
        .arg("rewrite")
        .arg(fixture("lists.cs"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("var numbers = new List<int> { 1, 2, 3 };"));
    assert!(!written.contains("[<"));
}

#[test]
fn rewrite_uses_configured_container() {
    listinit()
        .args(["rewrite", "--container", "Collection"])
        .arg(fixture("lists.cs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("new Collection<int> { 1, 2, 3 }"))
        .stdout(predicate::str::contains("new Collection<object>()"));
}

#[test]
fn rewrite_fails_when_a_literal_is_left_unresolved() {
    listinit()
        .arg("rewrite")
        .arg(fixture("unresolved.cs"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("var xs = [< mystery >];"))
        .stderr(predicate::str::contains("expected expression"));
}

#[test]
fn rewrite_can_proceed_without_a_type() {
    listinit()
        .args(["rewrite", "--on-unresolved", "proceed"])
        .arg(fixture("unresolved.cs"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("var xs = new List<?> { mystery };"))
        .stderr(predicate::str::contains(
            "cannot infer element type for 'new List<?>'",
        ));
}

#[test]
fn rewrite_reports_parse_errors() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("broken.cs");
    fs::write(&src, "var xs = [<1>]\n").unwrap();

    listinit()
        .arg("rewrite")
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected Semi"));
}

#[test]
fn rewrite_reports_missing_file() {
    listinit()
        .arg("rewrite")
        .arg(fixture("does_not_exist.cs"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot open file"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_lists_every_site() {
    listinit()
        .arg("check")
        .arg(fixture("lists.cs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Check: "))
        .stdout(predicate::str::contains("2:15 rewritten: 3 element(s) of int"))
        .stdout(predicate::str::contains("3:11 rewritten: 1 element(s) of string"))
        .stdout(predicate::str::contains("4:12 rewritten: empty List<object>"))
        .stdout(predicate::str::contains("3 rewritten, 0 abstained"))
        .stdout(predicate::str::contains("new List").not());
}

#[test]
fn check_flags_abstained_sites() {
    listinit()
        .arg("check")
        .arg(fixture("unresolved.cs"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("1:10 abstained: 1 element(s) of ?"))
        .stdout(predicate::str::contains("0 rewritten, 1 abstained"))
        .stdout(predicate::str::contains("expected expression"));
}

#[test]
fn debug_logging_goes_to_stderr() {
    listinit()
        .env("LISTINIT_LOG", "debug")
        .arg("rewrite")
        .arg(fixture("lists.cs"))
        .assert()
        .success()
        .stderr(predicate::str::contains("list literal rewritten"));
}

#[test]
fn unknown_policy_is_rejected() {
    listinit()
        .args(["rewrite", "--on-unresolved", "guess"])
        .arg(fixture("lists.cs"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

//! End-to-end tests for the `rhelper` binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::TestRepo;

fn rhelper(fixture: &TestRepo) -> Command {
    let mut cmd = Command::cargo_bin("rhelper").unwrap();
    cmd.arg("-R").arg(fixture.path()).env_remove("RHELPER_PATH_ENCODING");
    cmd
}

#[test]
fn rhsummary_writes_document_to_stdout() {
    let fixture = TestRepo::new();
    let c0 = fixture.commit(1_000, &[("README", "hello")]);
    fixture.tag("v1", c0);

    rhelper(&fixture)
        .arg("rhsummary")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml version=\"1.0\"?>\n<rhsummary>\n"))
        .stdout(predicate::str::contains(format!(
            "<tip revision=\"0\" node=\"{}\"/>\n<tag revision=\"0\" node=\"{}\" name=\"v1\"/>\n",
            c0, c0
        )))
        .stdout(predicate::str::ends_with("</repository>\n</rhsummary>\n"));
}

#[test]
fn rhmanifest_decodes_rev_and_path() {
    let fixture = TestRepo::new();
    fixture.commit(1_000, &[("foo/bar baz.txt", "x"), ("foo/sub/y", "y")]);
    fixture.commit(2_000, &[("foo/bar baz.txt", "x"), ("foo/sub/y", "y"), ("z", "z")]);

    rhelper(&fixture)
        .args(["rhmanifest", "-r", "0", "foo%2F"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<manifest revision=\"0\" path=\"foo/\">\n<file name=\"bar%20baz.txt\" revision=\"0\"",
        ))
        .stdout(predicate::str::contains("<dir name=\"sub\"/>\n</manifest>\n"));
}

#[test]
fn empty_repository_fails_with_closed_document() {
    let fixture = TestRepo::new();

    rhelper(&fixture)
        .arg("rhsummary")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("<tip").not())
        .stdout(predicate::str::ends_with("</repository>\n</rhsummary>\n"))
        .stderr(predicate::str::contains("Unknown revision"));
}

#[test]
fn unknown_path_encoding_fails_before_output() {
    let fixture = TestRepo::new();
    fixture.commit(1_000, &[("a", "1")]);

    rhelper(&fixture)
        .args(["--path-encoding", "no-such-charset", "rhmanifest"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn path_encoding_from_environment() {
    let fixture = TestRepo::new();
    fixture.commit(1_000, &[("caf\u{e9}", "1")]);

    rhelper(&fixture)
        .env("RHELPER_PATH_ENCODING", "windows-1252")
        .arg("rhmanifest")
        .assert()
        .success()
        .stdout(predicate::str::contains("<file name=\"caf%C3%83%C2%A9\""));
}

#[test]
fn missing_repository_fails() {
    let dir = tempfile::TempDir::new().unwrap();

    Command::cargo_bin("rhelper")
        .unwrap()
        .arg("-R")
        .arg(dir.path())
        .arg("rhsummary")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Repository not found"));
}

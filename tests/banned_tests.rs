//! Integration tests for banned rule import/export and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{tagprune_cmd, write_tags};

#[test]
fn test_export_prints_one_rule_per_line() {
    tagprune_cmd()
        .args(["banned", "export", "--banned", "meta:*", "--banned", "foo"])
        .assert()
        .success()
        .stdout("meta:*\nfoo\n");
}

#[test]
fn test_export_to_file_then_import_into_config() {
    let temp = TempDir::new().unwrap();
    let rules_file = temp.path().join("rules.list");

    tagprune_cmd()
        .args(["banned", "export", "--banned", "meta:*", "--banned", "^x$"])
        .arg("--output")
        .arg(&rules_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 rule(s)"));
    assert_eq!(fs::read_to_string(&rules_file).unwrap(), "meta:*\n^x$\n");

    tagprune_cmd()
        .args(["banned", "import"])
        .arg(&rules_file)
        .arg("--root")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 rule(s)"));

    tagprune_cmd()
        .args(["banned", "list"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout("meta:*\n^x$\n");
}

#[test]
fn test_export_of_blank_rules_writes_an_empty_file() {
    let temp = TempDir::new().unwrap();
    let rules_file = temp.path().join("rules.list");

    tagprune_cmd()
        .args(["banned", "export", "--banned", "  "])
        .arg("--output")
        .arg(&rules_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 0 rule(s)"));
    assert_eq!(fs::read_to_string(&rules_file).unwrap(), "");

    tagprune_cmd()
        .args(["banned", "export"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_import_skips_blank_lines_and_appends() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first.list");
    let second = temp.path().join("second.list");
    fs::write(&first, "a\n\n   \nb\n").unwrap();
    fs::write(&second, "b\r\nc\r\n").unwrap();

    tagprune_cmd()
        .args(["banned", "import"])
        .arg(&first)
        .arg("--root")
        .arg(temp.path())
        .assert()
        .success();
    tagprune_cmd()
        .args(["banned", "import"])
        .arg(&second)
        .arg("--root")
        .arg(temp.path())
        .arg("--append")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 rule(s)"));

    tagprune_cmd()
        .args(["banned", "list"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout("a\nb\nc\n");
}

#[test]
fn test_import_without_root_prints_rules() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("rules.list");
    fs::write(&file, "  one  \n\ntwo\n").unwrap();

    tagprune_cmd()
        .args(["banned", "import"])
        .arg(&file)
        .assert()
        .success()
        .stdout("one\ntwo\n");
    assert!(!temp.path().join(".tagprune").exists());
}

#[test]
fn test_list_without_rules() {
    let temp = TempDir::new().unwrap();

    tagprune_cmd()
        .args(["banned", "list"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No banned rules"));
}

#[test]
fn test_banned_file_flag_feeds_scan() {
    let temp = TempDir::new().unwrap();
    write_tags(temp.path(), "a.txt", "foo\nartist:foo\nbar\n");
    let file = temp.path().join("rules.list");
    fs::write(&file, "foo\n").unwrap();

    // an exact bare rule bans the tag in every namespace
    tagprune_cmd()
        .arg("scan")
        .arg(temp.path())
        .arg("--min-count")
        .arg("1")
        .arg("--banned-file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("foo").not())
        .stdout(predicate::str::contains("bar"));
}

#[test]
fn test_config_set_get_and_list() {
    let temp = TempDir::new().unwrap();

    tagprune_cmd()
        .arg("config")
        .arg(temp.path())
        .args(["min_count", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set min_count = 2"));

    tagprune_cmd()
        .arg("config")
        .arg(temp.path())
        .arg("min_count")
        .assert()
        .success()
        .stdout("2\n");

    tagprune_cmd()
        .arg("config")
        .arg(temp.path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("min_count = 2"))
        .stdout(predicate::str::contains("match_mode = exact"));
}

#[test]
fn test_config_rejects_unknown_key_and_banned_set() {
    let temp = TempDir::new().unwrap();

    tagprune_cmd()
        .arg("config")
        .arg(temp.path())
        .args(["colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));

    tagprune_cmd()
        .arg("config")
        .arg(temp.path())
        .args(["banned", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("banned import"));
}

#[test]
fn test_config_sort_lines_applies_on_rewrite() {
    let temp = TempDir::new().unwrap();
    write_tags(temp.path(), "a.txt", "zeta\ndrop\nalpha\n");

    tagprune_cmd()
        .arg("config")
        .arg(temp.path())
        .args(["sort_lines", "true"])
        .assert()
        .success();

    tagprune_cmd()
        .arg("apply")
        .arg(temp.path())
        .args(["--remove", "drop", "--yes"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("a.txt")).unwrap(),
        "alpha\nzeta\n"
    );
}

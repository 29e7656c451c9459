//! Integration tests for init and scan commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{tagprune_cmd, write_tags};

#[test]
fn test_init_writes_default_config() {
    let temp = TempDir::new().unwrap();

    tagprune_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tagprune"));

    let config = fs::read_to_string(temp.path().join(".tagprune/config.toml")).unwrap();
    assert!(config.contains("min_count = 5"));
    assert!(config.contains("match_mode = \"exact\""));
}

#[test]
fn test_init_rejects_unknown_mode() {
    let temp = TempDir::new().unwrap();

    tagprune_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--mode")
        .arg("fuzzy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid match mode"));
}

#[test]
fn test_scan_missing_root_exits_with_code_2() {
    let temp = TempDir::new().unwrap();

    tagprune_cmd()
        .arg("scan")
        .arg(temp.path().join("missing"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid root directory"));
}

#[test]
fn test_scan_counts_across_files() {
    let temp = TempDir::new().unwrap();
    write_tags(temp.path(), "one.txt", "artist:a\nartist:a\nsolo\n");
    write_tags(temp.path(), "nested/two.TXT", "artist:a\n");
    write_tags(temp.path(), "ignored.md", "artist:a\n");

    tagprune_cmd()
        .arg("scan")
        .arg(temp.path())
        .arg("--min-count")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scanned 2 file(s)"))
        .stdout(predicate::str::contains("[artist]"))
        .stdout(predicate::str::contains("a  3"))
        .stdout(predicate::str::contains("[general]"));
}

#[test]
fn test_scan_threshold_hides_rare_tags() {
    let temp = TempDir::new().unwrap();
    write_tags(temp.path(), "a.txt", "rare\ncommon\n");
    write_tags(temp.path(), "b.txt", "common\n");

    tagprune_cmd()
        .arg("scan")
        .arg(temp.path())
        .arg("--min-count")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("common"))
        .stdout(predicate::str::contains("rare").not());
}

#[test]
fn test_scan_json_reports_counts_by_namespace() {
    let temp = TempDir::new().unwrap();
    write_tags(temp.path(), "a.txt", "meta:2018\nmeta:2019\nwatersports\n");

    let output = tagprune_cmd()
        .arg("scan")
        .arg(temp.path())
        .arg("--min-count")
        .arg("1")
        .arg("--banned")
        .arg("meta:2018")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_files"], 1);
    assert_eq!(json["counts"]["meta"]["2019"], 1);
    assert_eq!(json["counts"]["general"]["watersports"], 1);
    assert!(json["counts"]["meta"].get("2018").is_none());
}

#[test]
fn test_scan_uses_config_and_env_match_mode() {
    let temp = TempDir::new().unwrap();
    write_tags(temp.path(), "a.txt", "meta:2018\nkeep\n");
    write_tags(
        temp.path(),
        ".tagprune/config.toml",
        "min_count = 1\nbanned = [\"meta:*\"]\n",
    );

    // exact mode: the wildcard rule matches nothing literally
    tagprune_cmd()
        .arg("scan")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2018"));

    tagprune_cmd()
        .env("TAGPRUNE_MATCH_MODE", "wildcard")
        .arg("scan")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2018").not())
        .stdout(predicate::str::contains("keep"));
}

#[test]
fn test_scan_skips_backup_directory() {
    let temp = TempDir::new().unwrap();
    write_tags(temp.path(), "a.txt", "keep\n");
    write_tags(
        temp.path(),
        ".tagprune/backups/20250101_000000/a.txt",
        "old\n",
    );

    tagprune_cmd()
        .arg("scan")
        .arg(temp.path())
        .arg("--min-count")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scanned 1 file(s)"))
        .stdout(predicate::str::contains("old").not());
}

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn tagprune_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tagprune").unwrap();
    cmd.env_remove("TAGPRUNE_MATCH_MODE");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a tag file, creating parent directories as needed
pub fn write_tags(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

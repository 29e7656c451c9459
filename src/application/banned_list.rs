//! Banned-rule list import/export and persistence

use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, TagRepository};
use std::fs;
use std::path::Path;

/// One rule per line; blank rules are dropped
pub fn export_banned(rules: &[String]) -> String {
    rules
        .iter()
        .filter(|rule| !rule.trim().is_empty())
        .map(|rule| rule.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse exported text back into rules: one per non-blank line, trimmed
pub fn import_banned(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a rules file from disk
pub fn read_banned_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(import_banned(&text))
}

/// Write exported rules to `path` and return how many were written.
///
/// Each rule ends with a newline; an empty rule list leaves an empty file.
pub fn write_banned_file(path: &Path, rules: &[String]) -> Result<usize> {
    let text = export_banned(rules);
    let count = text.lines().count();
    let content = if text.is_empty() {
        String::new()
    } else {
        format!("{}\n", text)
    };
    fs::write(path, content)?;
    Ok(count)
}

/// Append rules that are not already present, keeping the existing order
pub fn merge_rules(existing: &mut Vec<String>, incoming: Vec<String>) -> usize {
    let mut added = 0usize;
    for rule in incoming {
        if !existing.contains(&rule) {
            existing.push(rule);
            added += 1;
        }
    }
    added
}

/// Store imported rules in the root's config, replacing or appending
pub fn import_into_config(
    repository: &FileSystemRepository,
    rules: Vec<String>,
    append: bool,
) -> Result<usize> {
    let mut config = repository.load_config()?;
    let stored = if append {
        merge_rules(&mut config.banned, rules)
    } else {
        config.banned = Vec::new();
        merge_rules(&mut config.banned, rules)
    };
    repository.save_config(&config)?;
    log::info!(
        "Stored {} banned rule(s) in {}",
        stored,
        repository.root.display()
    );
    Ok(stored)
}

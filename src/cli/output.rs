//! Output formatting utilities

use crate::application::{ApplyReport, FileError, PreviewReport, ScanReport};
use crate::infrastructure::repository::relative_to;
use std::collections::BTreeMap;
use std::path::Path;

/// Format tag counts grouped by namespace, most frequent first
pub fn format_counts(counts: &BTreeMap<String, BTreeMap<String, usize>>) -> String {
    if counts.values().all(BTreeMap::is_empty) {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for (namespace, tags) in counts {
        if tags.is_empty() {
            continue;
        }
        output.push_str(&format!("[{}]\n", namespace));

        let mut rows: Vec<(&String, &usize)> = tags.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let width = rows.iter().map(|(tag, _)| tag.chars().count()).max().unwrap_or(0);
        for (tag, count) in rows {
            output.push_str(&format!("  {:<width$}  {}\n", tag, count, width = width));
        }
    }
    output
}

pub fn format_scan_report(report: &ScanReport, root: &Path) -> String {
    let mut output = format!("Scanned {} file(s)\n\n", report.total_files);
    output.push_str(&format_counts(&report.counts));
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(&format_errors(&report.errors, root));
    if report.cancelled {
        output.push_str("Scan cancelled; counts are partial\n");
    }
    output
}

pub fn format_preview_report(report: &PreviewReport, root: &Path) -> String {
    let mut output = String::new();

    for preview in &report.previews {
        output.push_str(&format!(
            "{} ({} removed)\n",
            relative_to(root, &preview.file).display(),
            preview.removed
        ));
        output.push_str(&format!("  before: {}\n", preview.before.join(", ")));
        output.push_str(&format!("  after:  {}\n", preview.after.join(", ")));
    }

    let hidden = report.files_modified.saturating_sub(report.previews.len());
    if hidden > 0 {
        output.push_str(&format!("... and {} more file(s)\n", hidden));
    }

    output.push_str(&format!(
        "{} of {} file(s) would change, {} tag(s) removed\n",
        report.files_modified, report.files_scanned, report.tags_removed
    ));
    output.push_str(&format_errors(&report.errors, root));
    output
}

pub fn format_apply_report(report: &ApplyReport, root: &Path) -> String {
    let mut output = String::new();

    match &report.backup_path {
        Some(backup) => output.push_str(&format!("Backup: {}\n", backup.display())),
        None => output.push_str("Nothing to change\n"),
    }
    output.push_str(&format!(
        "Modified {} of {} file(s), {} tag(s) removed\n",
        report.files_modified, report.files_scanned, report.tags_removed
    ));
    output.push_str(&format_errors(&report.errors, root));
    if report.cancelled {
        output.push_str("Apply cancelled; remaining files were left untouched\n");
    }
    output
}

/// Format banned rules for display
pub fn format_rule_list(rules: &[String]) -> String {
    if rules.is_empty() {
        return "No banned rules".to_string();
    }

    let mut output = String::new();
    for rule in rules {
        output.push_str(rule);
        output.push('\n');
    }
    output
}

fn format_errors(errors: &[FileError], root: &Path) -> String {
    let mut output = String::new();
    for error in errors {
        output.push_str(&format!(
            "error: {}: {}\n",
            relative_to(root, &error.path).display(),
            error.message
        ));
    }
    output
}

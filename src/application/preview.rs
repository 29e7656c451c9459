//! Preview use case: compute the removal effect without touching files

use crate::application::progress::{CancelFlag, FileError, Phase, Progress, ProgressFn};
use crate::domain::tags::{rewrite_lines, split_physical_lines, RemovalSet, RewriteOutcome};
use crate::infrastructure::FileSystemRepository;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    pub removal: RemovalSet,
    pub sort_lines: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePreview {
    pub file: PathBuf,
    pub before: Vec<String>,
    pub after: Vec<String>,
    pub removed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewReport {
    pub files_scanned: usize,
    pub files_modified: usize,
    pub tags_removed: usize,
    pub previews: Vec<FilePreview>,
    pub errors: Vec<FileError>,
    pub cancelled: bool,
}

/// A file whose content would change
#[derive(Debug, Clone)]
pub(crate) struct PlannedChange {
    pub path: PathBuf,
    pub outcome: RewriteOutcome,
}

#[derive(Debug, Default)]
pub(crate) struct RewritePlan {
    pub scanned: usize,
    pub changes: Vec<PlannedChange>,
    pub errors: Vec<FileError>,
    pub cancelled: bool,
}

impl RewritePlan {
    pub fn tags_removed(&self) -> usize {
        self.changes.iter().map(|c| c.outcome.removed).sum()
    }
}

/// Re-read every tag file and run the rewrite engine over it, read-only
pub(crate) fn plan_rewrites(
    repository: &FileSystemRepository,
    options: &RewriteOptions,
    progress: &mut ProgressFn<'_>,
    cancel: &CancelFlag,
) -> RewritePlan {
    let files = repository.list_tag_files();
    let total = files.len();
    let mut plan = RewritePlan::default();

    for (index, path) in files.iter().enumerate() {
        if cancel.is_cancelled() {
            log::info!("Planning cancelled after {} of {} file(s)", index, total);
            plan.cancelled = true;
            break;
        }

        match repository.read_text(path) {
            Ok(content) => {
                let outcome = rewrite_lines(
                    split_physical_lines(&content),
                    &options.removal,
                    options.sort_lines,
                );
                if outcome.changed {
                    log::debug!(
                        "{} would change: {} tag(s) removed",
                        path.display(),
                        outcome.removed
                    );
                    plan.changes.push(PlannedChange {
                        path: path.clone(),
                        outcome,
                    });
                }
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                plan.errors.push(FileError::new(path, e));
            }
        }
        plan.scanned += 1;

        progress(&Progress {
            phase: Phase::Plan,
            current: index + 1,
            total,
            path,
        });
    }

    plan
}

/// Summarize what `apply` would do, with full listings for up to `limit` files
pub fn preview_changes(
    repository: &FileSystemRepository,
    options: &RewriteOptions,
    limit: usize,
    progress: &mut ProgressFn<'_>,
    cancel: &CancelFlag,
) -> PreviewReport {
    let plan = plan_rewrites(repository, options, progress, cancel);
    let tags_removed = plan.tags_removed();

    let previews = plan
        .changes
        .iter()
        .take(limit)
        .map(|change| FilePreview {
            file: change.path.clone(),
            before: change.outcome.original_lines.clone(),
            after: change.outcome.kept_lines.clone(),
            removed: change.outcome.removed,
        })
        .collect();

    PreviewReport {
        files_scanned: plan.scanned,
        files_modified: plan.changes.len(),
        tags_removed,
        previews,
        errors: plan.errors,
        cancelled: plan.cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BannedRules, MatchMode, Selection};
    use std::fs;
    use tempfile::TempDir;

    fn options(specs: &[&str], banned: &[&str]) -> RewriteOptions {
        RewriteOptions {
            removal: RemovalSet::new(
                Selection::from_specs(specs.iter().copied()).unwrap(),
                BannedRules::new(banned.iter().copied(), MatchMode::Exact, false),
            ),
            sort_lines: false,
        }
    }

    #[test]
    fn preview_reports_before_and_after_without_writing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample.txt");
        let original = "artist:alacarte\nwatersports\nmeta:2018\n";
        fs::write(&path, original).unwrap();

        let repo = FileSystemRepository::open(temp.path()).unwrap();
        let report = preview_changes(
            &repo,
            &options(&["artist:alacarte"], &["meta:2018"]),
            5,
            &mut |_| {},
            &CancelFlag::new(),
        );

        assert_eq!(report.files_modified, 1);
        assert_eq!(report.tags_removed, 2);
        assert_eq!(report.previews.len(), 1);
        assert_eq!(report.previews[0].file, path);
        assert_eq!(
            report.previews[0].before,
            vec!["artist:alacarte", "watersports", "meta:2018"]
        );
        assert_eq!(report.previews[0].after, vec!["watersports"]);

        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert!(!temp.path().join(".tagprune").exists());
    }

    #[test]
    fn limit_caps_listings_but_not_totals() {
        let temp = TempDir::new().unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            fs::write(temp.path().join(name), "drop\nkeep\n").unwrap();
        }

        let repo = FileSystemRepository::open(temp.path()).unwrap();
        let report = preview_changes(
            &repo,
            &options(&["drop"], &[]),
            2,
            &mut |_| {},
            &CancelFlag::new(),
        );

        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.files_modified, 3);
        assert_eq!(report.tags_removed, 3);
        assert_eq!(report.previews.len(), 2);
    }

    #[test]
    fn unchanged_files_are_not_listed() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "keep\n").unwrap();

        let repo = FileSystemRepository::open(temp.path()).unwrap();
        let report = preview_changes(
            &repo,
            &options(&["drop"], &[]),
            5,
            &mut |_| {},
            &CancelFlag::new(),
        );
        assert_eq!(report.files_modified, 0);
        assert!(report.previews.is_empty());
    }

    #[test]
    fn crlf_files_compare_by_line_content() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "one\r\ntwo\r\n").unwrap();

        let repo = FileSystemRepository::open(temp.path()).unwrap();
        let report = preview_changes(
            &repo,
            &RewriteOptions::default(),
            5,
            &mut |_| {},
            &CancelFlag::new(),
        );
        assert_eq!(report.files_modified, 0);
    }
}

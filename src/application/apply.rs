//! Apply use case
//!
//! Plans every file read-only, backs up the whole changed set in one pass,
//! and only then rewrites. A backup failure aborts before any write; a write
//! failure is recorded for that file and the run moves on.

use crate::application::preview::{plan_rewrites, RewriteOptions};
use crate::application::progress::{CancelFlag, FileError, Phase, Progress, ProgressFn};
use crate::domain::tags::render_lines;
use crate::error::Result;
use crate::infrastructure::{BackupManager, FileSystemRepository};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedChange {
    pub file: PathBuf,
    pub removed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    /// `None` when no file needed changing
    pub backup_path: Option<PathBuf>,
    pub files_scanned: usize,
    pub files_modified: usize,
    pub tags_removed: usize,
    pub changes: Vec<AppliedChange>,
    pub errors: Vec<FileError>,
    pub cancelled: bool,
}

pub fn apply_changes(
    repository: &FileSystemRepository,
    options: &RewriteOptions,
    progress: &mut ProgressFn<'_>,
    cancel: &CancelFlag,
) -> Result<ApplyReport> {
    let plan = plan_rewrites(repository, options, progress, cancel);

    let mut report = ApplyReport {
        backup_path: None,
        files_scanned: plan.scanned,
        files_modified: 0,
        tags_removed: 0,
        changes: Vec::new(),
        errors: plan.errors,
        cancelled: plan.cancelled,
    };

    if report.cancelled || plan.changes.is_empty() {
        log::info!("Nothing written ({} file(s) scanned)", report.files_scanned);
        return Ok(report);
    }

    let to_backup: Vec<PathBuf> = plan.changes.iter().map(|c| c.path.clone()).collect();
    let backup_dir = BackupManager::new(&repository.root).backup_files(&to_backup)?;
    report.backup_path = Some(backup_dir);

    let total = plan.changes.len();
    for (index, change) in plan.changes.iter().enumerate() {
        if cancel.is_cancelled() {
            log::info!("Apply cancelled after {} of {} file(s)", index, total);
            report.cancelled = true;
            break;
        }

        let content = render_lines(&change.outcome.kept_lines);
        match repository.write_atomic(&change.path, &content) {
            Ok(()) => {
                log::debug!(
                    "Rewrote {}: {} tag(s) removed",
                    change.path.display(),
                    change.outcome.removed
                );
                report.files_modified += 1;
                report.tags_removed += change.outcome.removed;
                report.changes.push(AppliedChange {
                    file: change.path.clone(),
                    removed: change.outcome.removed,
                });
            }
            Err(e) => {
                log::warn!("Failed to write {}: {}", change.path.display(), e);
                report.errors.push(FileError::new(&change.path, e));
            }
        }

        progress(&Progress {
            phase: Phase::Write,
            current: index + 1,
            total,
            path: &change.path,
        });
    }

    log::info!(
        "Apply complete: {} file(s) modified, {} tag(s) removed",
        report.files_modified,
        report.tags_removed
    );

    Ok(report)
}

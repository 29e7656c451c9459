//! Scan use case
//!
//! Walks the root, parses every tag file and counts tags. Each call starts
//! from an empty aggregator; nothing carries over between scans.

use crate::application::progress::{CancelFlag, FileError, Phase, Progress, ProgressFn};
use crate::domain::tags::{Aggregator, BannedRules, TagAggregate, TagFilter};
use crate::infrastructure::FileSystemRepository;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub min_count: usize,
    pub rules: BannedRules,
}

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub files_found: Vec<PathBuf>,
    pub total_files: usize,
    /// `namespace -> tag -> count`, filtered by threshold and banned rules
    pub counts: BTreeMap<String, BTreeMap<String, usize>>,
    pub errors: Vec<FileError>,
    pub cancelled: bool,
    /// Unfiltered aggregates and per-file tags for interactive callers
    #[serde(skip)]
    pub aggregator: Aggregator,
}

impl ScanReport {
    /// Aggregates that pass the display filter, sorted by namespace and tag
    pub fn visible(&self, filter: &TagFilter) -> Vec<TagAggregate> {
        filter.filter(&self.aggregator.aggregates())
    }
}

pub fn scan_tags(
    repository: &FileSystemRepository,
    options: &ScanOptions,
    progress: &mut ProgressFn<'_>,
    cancel: &CancelFlag,
) -> ScanReport {
    let files = repository.list_tag_files();
    let total = files.len();
    log::info!(
        "Scanning {} tag file(s) under {}",
        total,
        repository.root.display()
    );

    let mut aggregator = Aggregator::new();
    let mut files_found = Vec::with_capacity(total);
    let mut errors = Vec::new();
    let mut cancelled = false;

    for (index, path) in files.iter().enumerate() {
        if cancel.is_cancelled() {
            log::info!("Scan cancelled after {} of {} file(s)", index, total);
            cancelled = true;
            break;
        }

        match repository.read_tag_file(path) {
            Ok(tag_file) => {
                log::debug!("Scanned {}: {} tag(s)", path.display(), tag_file.tags.len());
                aggregator.add_file(tag_file);
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                errors.push(FileError::new(path, e));
            }
        }
        files_found.push(path.clone());

        progress(&Progress {
            phase: Phase::Scan,
            current: index + 1,
            total,
            path,
        });
    }

    let filter = TagFilter::new(options.min_count, options.rules.clone());
    let counts = filter.filter_counts(&aggregator.counts());

    ScanReport {
        total_files: files_found.len(),
        files_found,
        counts,
        errors,
        cancelled,
        aggregator,
    }
}

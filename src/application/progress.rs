//! Progress reporting and cooperative cancellation for long runs

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Which pass of an operation a progress update belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Scan,
    Plan,
    Write,
}

/// Reported after each file completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress<'a> {
    pub phase: Phase,
    pub current: usize,
    pub total: usize,
    pub path: &'a Path,
}

/// Callback invoked with every progress update
pub type ProgressFn<'a> = dyn FnMut(&Progress<'_>) + 'a;

/// A shared flag checked between files.
///
/// Clones share the same flag, so a caller can hand one clone to a worker
/// thread and cancel from another.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A per-file failure that did not stop the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub path: PathBuf,
    pub message: String,
}

impl FileError {
    pub fn new(path: &Path, error: impl std::fmt::Display) -> Self {
        Self {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let flag = CancelFlag::new();
        let worker = flag.clone();
        assert!(!worker.is_cancelled());

        flag.cancel();
        assert!(worker.is_cancelled());
    }

    #[test]
    fn cancel_from_another_thread() {
        let flag = CancelFlag::new();
        let remote = flag.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(flag.is_cancelled());
    }
}

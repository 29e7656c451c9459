//! Timestamped backups taken before files are rewritten

use crate::error::{Result, TagpruneError};
use crate::infrastructure::config::STATE_DIR;
use crate::infrastructure::repository::relative_to;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates `<root>/.tagprune/backups/<YYYYMMDD_HHMMSS>` and copies files into it
#[derive(Debug, Clone)]
pub struct BackupManager {
    root: PathBuf,
}

impl BackupManager {
    pub fn new(root: &Path) -> Self {
        BackupManager {
            root: root.to_path_buf(),
        }
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR).join("backups")
    }

    /// Create a fresh backup directory named after the current local time.
    ///
    /// A `-N` suffix is added when a directory for the same second exists.
    pub fn create_backup_dir(&self) -> Result<PathBuf> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let base = self.backups_dir();
        fs::create_dir_all(&base)?;

        let mut candidate = base.join(&stamp);
        let mut attempt = 1;
        loop {
            match fs::create_dir(&candidate) {
                Ok(()) => return Ok(candidate),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    candidate = base.join(format!("{}-{}", stamp, attempt));
                    attempt += 1;
                }
                Err(e) => return Err(TagpruneError::Io(e)),
            }
        }
    }

    /// Copy every file into a new backup directory and return its path.
    ///
    /// Stops at the first failing copy; files copied so far stay in place.
    pub fn backup_files(&self, files: &[PathBuf]) -> Result<PathBuf> {
        let backup_dir = self.create_backup_dir()?;
        log::info!("Creating backup in {}", backup_dir.display());

        for file in files {
            let dest = backup_dir.join(relative_to(&self.root, file));
            copy_preserving(file, &dest).map_err(|source| TagpruneError::Backup {
                path: file.clone(),
                source,
            })?;
            log::debug!("Backed up {} -> {}", file.display(), dest.display());
        }

        log::info!("Backup complete: {} file(s)", files.len());
        Ok(backup_dir)
    }
}

/// Copy contents and permissions, then carry over the modification time
fn copy_preserving(from: &Path, to: &Path) -> std::io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::copy(from, to)?;

    let modified = fs::metadata(from)?.modified()?;
    fs::File::options()
        .write(true)
        .open(to)?
        .set_modified(modified)?;
    Ok(())
}

//! File system repository

use crate::domain::TagFile;
use crate::error::{Result, TagpruneError};
use crate::infrastructure::config::STATE_DIR;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of tag files, compared case-insensitively
pub const TAG_FILE_EXTENSION: &str = "txt";

/// Abstract repository over a tree of tag files
pub trait TagRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .tagprune/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .tagprune/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .tagprune directory exists
    fn is_initialized(&self) -> bool;

    /// Create .tagprune directory
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of TagRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a repository without checking the root
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Open a repository, rejecting roots that are missing or not directories
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(TagpruneError::InvalidRoot(root.to_path_buf()));
        }
        Ok(FileSystemRepository::new(root.to_path_buf()))
    }

    fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR)
    }
}

impl TagRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Config::config_path(&self.root).is_file()
    }

    fn initialize(&self) -> Result<()> {
        if self.is_initialized() {
            return Err(TagpruneError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(self.state_dir())?;
        Ok(())
    }
}

// Tag file operations (not part of trait - filesystem-specific)
impl FileSystemRepository {
    fn is_tag_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TAG_FILE_EXTENSION))
    }

    /// List every `.txt` file under the root, sorted by full path.
    ///
    /// The `.tagprune` state directory (config and backups) is never walked.
    /// Unreadable directory entries are skipped with a warning.
    pub fn list_tag_files(&self) -> Vec<PathBuf> {
        let walker = WalkDir::new(&self.root).into_iter().filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            entry.file_name() != STATE_DIR
        });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && Self::is_tag_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        files
    }

    /// Read a file as text: UTF-8 first, then Latin-1 so that stray bytes
    /// never abort a run
    pub fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                log::warn!(
                    "{} is not valid UTF-8, decoding as Latin-1",
                    self.relative_path(path).display()
                );
                Ok(decode_latin1(e.as_bytes()))
            }
        }
    }

    /// Read and parse one tag file
    pub fn read_tag_file(&self, path: &Path) -> Result<TagFile> {
        let content = self.read_text(path)?;
        Ok(TagFile::from_content(path.to_path_buf(), &content))
    }

    /// Path relative to the root, or just the file name for paths outside it
    pub fn relative_path(&self, path: &Path) -> PathBuf {
        relative_to(&self.root, path)
    }

    /// Write file content using a best-effort atomic replace:
    /// write to a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
    pub fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.tagprune-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("tags.txt"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        let permissions = match fs::metadata(path) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(TagpruneError::Io(e)),
        };

        // The rewritten file keeps the original's mode
        let staged = fs::write(&tmp_path, content).and_then(|()| match permissions {
            Some(permissions) => fs::set_permissions(&tmp_path, permissions),
            None => Ok(()),
        });
        if let Err(e) = staged {
            let _ = fs::remove_file(&tmp_path);
            return Err(TagpruneError::Io(e));
        }

        if cfg!(windows) && path.exists() {
            // Backups taken before the batch are the rollback path.
            fs::remove_file(path)?;
        }

        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(TagpruneError::Io(e));
        }
        Ok(())
    }
}

/// `path` relative to `root`, falling back to the bare file name
pub fn relative_to(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf()),
    }
}

/// Every byte maps to the code point of the same value
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

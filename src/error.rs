//! Error types for tagprune

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tagprune
#[derive(Debug, Error)]
pub enum TagpruneError {
    #[error("Invalid root directory: {0}")]
    InvalidRoot(PathBuf),

    #[error("Backup failed for {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid selection: {0}")]
    Selection(String),

    #[error("Failed to parse config.toml: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TagpruneError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TagpruneError::InvalidRoot(_) => 2,
            TagpruneError::Backup { .. } => 3,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TagpruneError::InvalidRoot(path) => {
                format!(
                    "Invalid root directory: {}\n\n\
                    Suggestions:\n\
                    • Check that the path exists and is a directory\n\
                    • Pass the folder that contains your .txt tag files",
                    path.display()
                )
            }
            TagpruneError::Backup { path, source } => {
                format!(
                    "Backup failed for {}: {}\n\n\
                    No files were rewritten. Files already copied remain in the\n\
                    backup directory under .tagprune/backups.",
                    path.display(),
                    source
                )
            }
            TagpruneError::Config(msg) => {
                if msg.contains("match mode") {
                    format!(
                        "{}\n\n\
                        Valid match modes: exact, substring, wildcard, regex\n\
                        Example: tagprune config . match_mode wildcard",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            TagpruneError::Selection(msg) => {
                format!(
                    "Invalid selection: {}\n\n\
                    Selections use namespace:tag (e.g. artist:alacarte) or a bare tag\n\
                    for the general namespace. JSON selections map namespaces to\n\
                    lists of tags: {{\"artist\": [\"alacarte\"]}}",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TagpruneError
pub type Result<T> = std::result::Result<T, TagpruneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_root_suggestion() {
        let err = TagpruneError::InvalidRoot(PathBuf::from("/tmp/missing"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("/tmp/missing"));
        assert!(msg.contains("Suggestions"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_backup_error_mentions_no_writes() {
        let err = TagpruneError::Backup {
            path: PathBuf::from("a.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.display_with_suggestions();
        assert!(msg.contains("No files were rewritten"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_config_match_mode_suggestions() {
        let err = TagpruneError::Config("Invalid match mode: fuzzy".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("exact, substring, wildcard, regex"));
    }

    #[test]
    fn test_selection_suggestions() {
        let err = TagpruneError::Selection("empty tag".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("namespace:tag"));
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = TagpruneError::Config("plain".to_string());
        assert_eq!(err.display_with_suggestions(), "plain");
        assert_eq!(err.exit_code(), 1);
    }
}

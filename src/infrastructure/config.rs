//! Configuration management

use crate::domain::MatchMode;
use crate::error::{Result, TagpruneError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Directory under a scan root holding config and backups
pub const STATE_DIR: &str = ".tagprune";

/// Environment variable that overrides the configured match mode
pub const MATCH_MODE_ENV: &str = "TAGPRUNE_MATCH_MODE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_count: usize,
    pub match_mode: MatchMode,
    pub case_insensitive: bool,
    pub sort_lines: bool,
    pub preview_limit: usize,
    pub banned: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_count: 5,
            match_mode: MatchMode::Exact,
            case_insensitive: false,
            sort_lines: false,
            preview_limit: 5,
            banned: Vec::new(),
        }
    }
}

impl Config {
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(STATE_DIR).join("config.toml")
    }

    /// Load config from .tagprune/config.toml, falling back to defaults when
    /// the file does not exist
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = Self::config_path(path);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(TagpruneError::Io(e)),
        };

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to .tagprune/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let state_dir = path.join(STATE_DIR);

        if !state_dir.exists() {
            fs::create_dir_all(&state_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(Self::config_path(path), contents)?;

        Ok(())
    }

    /// Get the match mode, checking the environment override first
    pub fn effective_match_mode(&self) -> Result<MatchMode> {
        match std::env::var(MATCH_MODE_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                MatchMode::from_str(&value).map_err(TagpruneError::Config)
            }
            _ => Ok(self.match_mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.min_count, 5);
        assert_eq!(config.match_mode, MatchMode::Exact);
        assert_eq!(config.preview_limit, 5);
        assert!(config.banned.is_empty());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            min_count: 2,
            match_mode: MatchMode::Wildcard,
            banned: vec!["meta:*".to_string()],
            ..Config::default()
        };

        config.save_to_dir(temp.path()).unwrap();
        assert!(temp.path().join(".tagprune/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(STATE_DIR)).unwrap();
        fs::write(
            Config::config_path(temp.path()),
            "match_mode = \"regex\"\nbanned = [\"^meta:\"]\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.match_mode, MatchMode::Regex);
        assert_eq!(loaded.banned, vec!["^meta:".to_string()]);
        assert_eq!(loaded.min_count, 5);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(STATE_DIR)).unwrap();
        fs::write(Config::config_path(temp.path()), "match_mode = \"fuzzy\"\n").unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            TagpruneError::TomlDeserialize(e) => assert!(e.to_string().contains("fuzzy")),
            other => panic!("Expected TOML error, got {}", other),
        }
    }
}

//! Config management use case

use crate::domain::MatchMode;
use crate::error::{Result, TagpruneError};
use crate::infrastructure::{Config, FileSystemRepository, TagRepository};
use std::str::FromStr;

const VALID_KEYS: &str = "min_count, match_mode, case_insensitive, sort_lines, preview_limit, banned";

/// Service for managing per-root configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "min_count" => Ok(config.min_count.to_string()),
            "match_mode" => Ok(config.match_mode.to_string()),
            "case_insensitive" => Ok(config.case_insensitive.to_string()),
            "sort_lines" => Ok(config.sort_lines.to_string()),
            "preview_limit" => Ok(config.preview_limit.to_string()),
            "banned" => Ok(config.banned.join("\n")),
            _ => Err(TagpruneError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "min_count" => config.min_count = parse_number(key, value)?,
            "preview_limit" => config.preview_limit = parse_number(key, value)?,
            "match_mode" => {
                config.match_mode = MatchMode::from_str(value).map_err(TagpruneError::Config)?;
            }
            "case_insensitive" => config.case_insensitive = parse_bool(key, value)?,
            "sort_lines" => config.sort_lines = parse_bool(key, value)?,
            "banned" => {
                return Err(TagpruneError::Config(
                    "Use 'tagprune banned import' to change banned rules".to_string(),
                ));
            }
            _ => {
                return Err(TagpruneError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn parse_number(key: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        TagpruneError::Config(format!(
            "Invalid value for {}: '{}' (expected a non-negative integer)",
            key, value
        ))
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(TagpruneError::Config(format!(
            "Invalid value for {}: '{}' (expected true or false)",
            key, value
        ))),
    }
}

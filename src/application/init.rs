//! Initialize a tag root use case

use crate::domain::MatchMode;
use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, TagRepository};
use std::path::Path;

/// Write a default `.tagprune/config.toml` under an existing directory
pub fn init(path: &Path, match_mode: MatchMode, min_count: usize) -> Result<()> {
    let repo = FileSystemRepository::open(path)?;

    repo.initialize()?;

    let config = Config {
        match_mode,
        min_count,
        ..Config::default()
    };
    repo.save_config(&config)?;

    println!("Initialized tagprune at {}", path.display());
    println!("Match mode: {}", match_mode);

    Ok(())
}

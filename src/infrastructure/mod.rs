//! Infrastructure layer - External I/O and persistence

pub mod backup;
pub mod config;
pub mod repository;

pub use backup::BackupManager;
pub use config::Config;
pub use repository::{FileSystemRepository, TagRepository};

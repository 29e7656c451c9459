//! Application layer - Use cases and orchestration

pub mod apply;
pub mod banned_list;
pub mod init;
pub mod manage_config;
pub mod preview;
pub mod progress;
pub mod scan;

pub use apply::{apply_changes, AppliedChange, ApplyReport};
pub use banned_list::{
    export_banned, import_banned, import_into_config, read_banned_file, write_banned_file,
};
pub use manage_config::ConfigService;
pub use preview::{preview_changes, FilePreview, PreviewReport, RewriteOptions};
pub use progress::{CancelFlag, FileError, Phase, Progress, ProgressFn};
pub use scan::{scan_tags, ScanOptions, ScanReport};

//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{BannedCommand, Cli, Commands, RemovalArgs, RuleArgs};
pub use output::{
    format_apply_report, format_counts, format_preview_report, format_rule_list,
    format_scan_report,
};

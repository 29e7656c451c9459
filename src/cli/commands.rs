//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tagprune")]
#[command(about = "Count and prune tags in folders of plain-text tag files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log every file touched (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Banned-rule flags shared by every command that filters tags
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Banned rule (repeatable); added to the rules stored in config
    #[arg(long = "banned", value_name = "RULE")]
    pub banned: Vec<String>,

    /// File with one banned rule per line
    #[arg(long, value_name = "FILE")]
    pub banned_file: Option<PathBuf>,

    /// How banned rules match (exact, substring, wildcard, regex)
    #[arg(long, value_name = "MODE")]
    pub match_mode: Option<String>,

    /// Match banned rules case-insensitively
    #[arg(short = 'i', long)]
    pub case_insensitive: bool,
}

/// Flags that describe what preview/apply remove
#[derive(Args, Debug, Clone, Default)]
pub struct RemovalArgs {
    /// Tag to remove, as namespace:tag or a bare tag (repeatable)
    #[arg(long = "remove", value_name = "NS:TAG")]
    pub remove: Vec<String>,

    /// JSON file mapping namespaces to lists of tags to remove
    #[arg(long, value_name = "FILE")]
    pub selection: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Sort the kept lines of each rewritten file
    #[arg(long)]
    pub sort: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .tagprune/config.toml with default settings
    Init {
        /// Directory holding the tag files (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Match mode stored in the new config
        #[arg(short, long, default_value = "exact")]
        mode: String,

        /// Minimum count for a tag to be listed
        #[arg(long, default_value_t = 5)]
        min_count: usize,
    },

    /// Count tags across every .txt file under ROOT
    Scan {
        root: PathBuf,

        /// Hide tags seen fewer times than this
        #[arg(long, value_name = "N")]
        min_count: Option<usize>,

        #[command(flatten)]
        rules: RuleArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what apply would change without writing anything
    Preview {
        root: PathBuf,

        #[command(flatten)]
        removal: RemovalArgs,

        /// Number of files listed in full
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Back up affected files, then remove tags from them
    Apply {
        root: PathBuf,

        #[command(flatten)]
        removal: RemovalArgs,

        /// Actually write; without this only the plan is printed
        #[arg(short, long)]
        yes: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import, export or list banned rules
    Banned {
        #[command(subcommand)]
        action: BannedCommand,
    },

    /// View or modify configuration
    Config {
        root: PathBuf,

        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum BannedCommand {
    /// Write rules as text, one per line
    Export {
        /// Banned rule (repeatable)
        #[arg(long = "banned", value_name = "RULE")]
        banned: Vec<String>,

        /// File with one banned rule per line
        #[arg(long, value_name = "FILE")]
        banned_file: Option<PathBuf>,

        /// Read rules stored in this root's config as well
        #[arg(long, value_name = "ROOT")]
        root: Option<PathBuf>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Read rules from a text file
    Import {
        file: PathBuf,

        /// Store the rules in this root's config instead of printing them
        #[arg(long, value_name = "ROOT")]
        root: Option<PathBuf>,

        /// Keep rules already in the config
        #[arg(short, long)]
        append: bool,
    },

    /// Show the rules stored in a root's config
    List {
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

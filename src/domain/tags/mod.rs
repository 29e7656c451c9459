//! Tag system

pub mod aggregate;
pub mod matcher;
pub mod parser;
pub mod rewrite;
pub mod selection;

// Re-export main types
pub use aggregate::{split_physical_lines, Aggregator, LineEnding, TagAggregate, TagFile};
pub use matcher::{matches, BannedRules, MatchMode};
pub use parser::{
    format_tag, normalize_whitespace, parse_line, parse_tag_line, Tag, TagLine,
    GENERAL_NAMESPACE,
};
pub use rewrite::{render_lines, rewrite_lines, RewriteOutcome};
pub use selection::{RemovalSet, Selection, TagFilter};

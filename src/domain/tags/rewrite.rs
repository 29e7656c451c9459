//! Line-level tag removal
//!
//! Pure transform over a file's physical lines. Callers decide whether to
//! write the result; a file only needs writing when `changed` is true.

use crate::domain::tags::parser::parse_tag_line;
use crate::domain::tags::selection::RemovalSet;
use serde::Serialize;

/// Result of running the removal set over one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteOutcome {
    pub changed: bool,
    pub removed: usize,
    pub original_lines: Vec<String>,
    pub kept_lines: Vec<String>,
}

/// Apply `removal` to `lines`.
///
/// Lines without a tag are dropped from both sequences, so stray blank lines
/// never make a file count as changed on their own. Kept lines are
/// re-emitted in whitespace-normalized form, which means a file that only
/// needed whitespace cleanup still counts as changed.
pub fn rewrite_lines<'a, I>(lines: I, removal: &RemovalSet, sort_lines: bool) -> RewriteOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let mut original_lines = Vec::new();
    let mut kept_lines = Vec::new();
    let mut removed = 0usize;

    for raw in lines {
        let Some(parsed) = parse_tag_line(raw) else {
            continue;
        };

        original_lines.push(raw.trim_end().to_string());

        if removal.should_remove(&parsed.tag.namespace, &parsed.tag.text) {
            removed += 1;
            continue;
        }

        let rendered = parsed.render();
        if !rendered.trim().is_empty() {
            kept_lines.push(rendered);
        }
    }

    if sort_lines {
        kept_lines.sort();
    }

    RewriteOutcome {
        changed: kept_lines != original_lines,
        removed,
        original_lines,
        kept_lines,
    }
}

/// Render kept lines as file content: `\n` after every line
pub fn render_lines(lines: &[String]) -> String {
    let mut output = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

//! Tag line parsing
//!
//! Tag files hold one tag per line. A line is either a bare tag (which lands
//! in the `general` namespace) or `namespace:tag`, split at the first colon.

use serde::Serialize;
use std::fmt;

/// Namespace assigned to lines without a `namespace:` prefix.
pub const GENERAL_NAMESPACE: &str = "general";

/// A single tag, identified by its namespace and text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Tag {
    pub namespace: String,
    pub text: String,
}

impl Tag {
    pub fn new(namespace: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            text: text.into(),
        }
    }

    /// Create a tag in the general namespace
    pub fn general(text: impl Into<String>) -> Self {
        Self::new(GENERAL_NAMESPACE, text)
    }

    pub fn is_general(&self) -> bool {
        self.namespace == GENERAL_NAMESPACE
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_tag(&self.namespace, &self.text))
    }
}

/// A parsed line on the rewrite path.
///
/// Remembers whether the source line spelled out its namespace, so that
/// `general:foo` is written back as `general:foo` rather than `foo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLine {
    pub tag: Tag,
    pub explicit_namespace: bool,
}

impl TagLine {
    /// Canonical text for this line when written back to disk
    pub fn render(&self) -> String {
        if self.explicit_namespace && !self.tag.namespace.is_empty() {
            format!("{}:{}", self.tag.namespace, self.tag.text)
        } else {
            self.tag.text.clone()
        }
    }
}

/// Parse one raw line into a tag (scan/display path).
///
/// Surrounding whitespace is trimmed but internal whitespace is kept as is.
/// Returns `None` for blank lines and for lines whose tag part is empty
/// (e.g. `artist:`).
pub fn parse_line(line: &str) -> Option<Tag> {
    split_line(line.trim()).map(|(tag, _)| tag)
}

/// Parse one raw line on the rewrite path.
///
/// Internal whitespace runs are collapsed to a single space before splitting.
pub fn parse_tag_line(line: &str) -> Option<TagLine> {
    let cleaned = normalize_whitespace(line);
    split_line(&cleaned).map(|(tag, explicit_namespace)| TagLine {
        tag,
        explicit_namespace,
    })
}

fn split_line(line: &str) -> Option<(Tag, bool)> {
    if line.is_empty() {
        return None;
    }

    let (tag, explicit) = match line.split_once(':') {
        Some((namespace, text)) => (Tag::new(namespace.trim(), text.trim()), true),
        None => (Tag::general(line), false),
    };

    if tag.text.is_empty() {
        return None;
    }

    Some((tag, explicit))
}

/// Format a tag the way it is written in a file.
///
/// General tags are written without a prefix.
pub fn format_tag(namespace: &str, tag: &str) -> String {
    if namespace == GENERAL_NAMESPACE {
        tag.to_string()
    } else {
        format!("{}:{}", namespace, tag)
    }
}

/// Trim and collapse every internal run of whitespace to a single space
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

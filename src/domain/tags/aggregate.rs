//! Per-tag occurrence counting across a set of tag files

use crate::domain::tags::parser::{parse_line, Tag};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Line ending style detected in a tag file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    /// `\r\n` wins if present anywhere, then a lone `\r`, else `\n`
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            LineEnding::CrLf
        } else if content.contains('\r') {
            LineEnding::Cr
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }
}

/// Split text into physical lines, accepting `\n`, `\r\n` and lone `\r`.
///
/// A trailing terminator does not produce an extra empty line.
pub fn split_physical_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = content.as_bytes();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&content[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&content[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < content.len() {
        lines.push(&content[start..]);
    }

    lines
}

/// A scanned tag file: its tags in line order (duplicates kept)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagFile {
    pub path: PathBuf,
    pub tags: Vec<Tag>,
    pub line_ending: LineEnding,
}

impl TagFile {
    /// Parse decoded file content into a tag file
    pub fn from_content(path: PathBuf, content: &str) -> Self {
        let tags = split_physical_lines(content)
            .into_iter()
            .filter_map(parse_line)
            .collect();

        Self {
            path,
            tags,
            line_ending: LineEnding::detect(content),
        }
    }
}

/// Occurrence count and containing files for one (namespace, tag) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagAggregate {
    pub namespace: String,
    pub tag: String,
    pub count: usize,
    pub file_paths: BTreeSet<PathBuf>,
    pub marked_for_removal: bool,
}

impl TagAggregate {
    pub fn new(namespace: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            tag: tag.into(),
            count: 0,
            file_paths: BTreeSet::new(),
            marked_for_removal: false,
        }
    }

    fn add_occurrence(&mut self, path: &Path) {
        self.count += 1;
        if !self.file_paths.contains(path) {
            self.file_paths.insert(path.to_path_buf());
        }
    }
}

/// Builds aggregates incrementally, one file at a time
#[derive(Debug, Default)]
pub struct Aggregator {
    aggregates: BTreeMap<Tag, TagAggregate>,
    files: BTreeMap<PathBuf, TagFile>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file and count each of its tags.
    ///
    /// Adding the same path twice replaces the earlier contribution.
    pub fn add_file(&mut self, file: TagFile) {
        if let Some(previous) = self.files.remove(&file.path) {
            self.forget(&previous);
        }

        for tag in &file.tags {
            self.aggregates
                .entry(tag.clone())
                .or_insert_with(|| TagAggregate::new(&tag.namespace, &tag.text))
                .add_occurrence(&file.path);
        }

        self.files.insert(file.path.clone(), file);
    }

    fn forget(&mut self, file: &TagFile) {
        for tag in &file.tags {
            if let Some(aggregate) = self.aggregates.get_mut(tag) {
                aggregate.count -= 1;
                aggregate.file_paths.remove(&file.path);
                if aggregate.count == 0 {
                    self.aggregates.remove(tag);
                }
            }
        }
    }

    /// All aggregates sorted by namespace, then tag
    pub fn aggregates(&self) -> Vec<TagAggregate> {
        self.aggregates.values().cloned().collect()
    }

    /// Aggregates grouped by namespace, each group sorted by tag
    pub fn aggregates_by_namespace(&self) -> BTreeMap<String, Vec<TagAggregate>> {
        let mut grouped: BTreeMap<String, Vec<TagAggregate>> = BTreeMap::new();
        for aggregate in self.aggregates.values() {
            grouped
                .entry(aggregate.namespace.clone())
                .or_default()
                .push(aggregate.clone());
        }
        grouped
    }

    pub fn get(&self, namespace: &str, tag: &str) -> Option<&TagAggregate> {
        self.aggregates.get(&Tag::new(namespace, tag))
    }

    /// Files that contain the tag, sorted
    pub fn file_paths_for_tag(&self, namespace: &str, tag: &str) -> Vec<PathBuf> {
        self.get(namespace, tag)
            .map(|a| a.file_paths.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, TagFile> {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.aggregates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }

    pub fn clear(&mut self) {
        self.aggregates.clear();
        self.files.clear();
    }

    /// Counts as `namespace -> tag -> count`
    pub fn counts(&self) -> BTreeMap<String, BTreeMap<String, usize>> {
        let mut counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        for aggregate in self.aggregates.values() {
            counts
                .entry(aggregate.namespace.clone())
                .or_default()
                .insert(aggregate.tag.clone(), aggregate.count);
        }
        counts
    }
}

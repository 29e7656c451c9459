//! Display filtering and removal-set resolution
//!
//! The display filter hides tags below the count threshold and banned tags.
//! It never decides what gets removed: removal is the union of explicit
//! marks and banned matches, regardless of count.

use crate::domain::tags::aggregate::TagAggregate;
use crate::domain::tags::matcher::BannedRules;
use crate::domain::tags::parser::{normalize_whitespace, parse_line, Tag};
use crate::error::{Result, TagpruneError};
use std::collections::{BTreeMap, BTreeSet};

/// Threshold plus banned-rule filter for what is shown to the user
#[derive(Debug, Clone)]
pub struct TagFilter {
    pub min_count: usize,
    pub rules: BannedRules,
}

impl TagFilter {
    pub fn new(min_count: usize, rules: BannedRules) -> Self {
        Self { min_count, rules }
    }

    pub fn accepts(&self, aggregate: &TagAggregate) -> bool {
        aggregate.count >= self.min_count
            && !self.rules.is_banned(&aggregate.namespace, &aggregate.tag)
    }

    /// Aggregates with `count >= min_count` that no rule bans
    pub fn filter(&self, aggregates: &[TagAggregate]) -> Vec<TagAggregate> {
        aggregates
            .iter()
            .filter(|a| self.accepts(a))
            .cloned()
            .collect()
    }

    /// Filter `namespace -> tag -> count` maps, dropping empty namespaces
    pub fn filter_counts(
        &self,
        counts: &BTreeMap<String, BTreeMap<String, usize>>,
    ) -> BTreeMap<String, BTreeMap<String, usize>> {
        counts
            .iter()
            .filter_map(|(namespace, tags)| {
                let kept: BTreeMap<String, usize> = tags
                    .iter()
                    .filter(|(tag, count)| {
                        **count >= self.min_count && !self.rules.is_banned(namespace, tag)
                    })
                    .map(|(tag, count)| (tag.clone(), *count))
                    .collect();
                (!kept.is_empty()).then(|| (namespace.clone(), kept))
            })
            .collect()
    }
}

/// Tags the user explicitly marked for removal, keyed by namespace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    marks: BTreeMap<String, BTreeSet<String>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a tag. Internal whitespace is collapsed so marks line up with
    /// the normalized lines the rewrite engine compares against.
    pub fn mark(&mut self, namespace: &str, tag: &str) {
        let tag = normalize_whitespace(tag);
        if tag.is_empty() {
            return;
        }
        self.marks
            .entry(namespace.trim().to_string())
            .or_default()
            .insert(tag);
    }

    pub fn unmark(&mut self, namespace: &str, tag: &str) {
        let tag = normalize_whitespace(tag);
        if let Some(tags) = self.marks.get_mut(namespace.trim()) {
            tags.remove(&tag);
            if tags.is_empty() {
                self.marks.remove(namespace.trim());
            }
        }
    }

    pub fn contains(&self, namespace: &str, tag: &str) -> bool {
        self.marks
            .get(namespace)
            .is_some_and(|tags| tags.contains(tag))
    }

    /// Parse `namespace:tag` specs; bare specs land in `general`
    pub fn from_specs<I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for spec in specs {
            let spec = spec.as_ref();
            let tag = parse_line(spec).ok_or_else(|| {
                TagpruneError::Selection(format!("'{}' does not name a tag", spec))
            })?;
            selection.mark(&tag.namespace, &tag.text);
        }
        Ok(selection)
    }

    /// Parse a JSON object mapping namespaces to lists of tags
    pub fn from_json(json: &str) -> Result<Self> {
        let map: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::from_map(map))
    }

    pub fn from_map(map: BTreeMap<String, Vec<String>>) -> Self {
        let mut selection = Self::new();
        for (namespace, tags) in map {
            for tag in tags {
                selection.mark(&namespace, &tag);
            }
        }
        selection
    }

    /// Merge another selection into this one
    pub fn extend(&mut self, other: Selection) {
        for (namespace, tags) in other.marks {
            self.marks.entry(namespace).or_default().extend(tags);
        }
    }

    pub fn len(&self) -> usize {
        self.marks.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        self.marks
            .iter()
            .flat_map(|(ns, tags)| tags.iter().map(move |tag| Tag::new(ns.as_str(), tag.as_str())))
    }
}

/// Everything that will be removed: explicit marks OR banned matches
#[derive(Debug, Clone, Default)]
pub struct RemovalSet {
    explicit: Selection,
    rules: BannedRules,
}

impl RemovalSet {
    pub fn new(explicit: Selection, rules: BannedRules) -> Self {
        Self { explicit, rules }
    }

    pub fn selection(&self) -> &Selection {
        &self.explicit
    }

    pub fn rules(&self) -> &BannedRules {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty() && self.rules.is_empty()
    }

    pub fn should_remove(&self, namespace: &str, tag: &str) -> bool {
        self.explicit.contains(namespace, tag) || self.rules.is_banned(namespace, tag)
    }

    /// The aggregated tags this set removes. The count threshold plays no part.
    pub fn resolve(&self, aggregates: &[TagAggregate]) -> BTreeSet<Tag> {
        let mut removed: BTreeSet<Tag> = aggregates
            .iter()
            .filter(|a| self.should_remove(&a.namespace, &a.tag))
            .map(|a| Tag::new(a.namespace.as_str(), a.tag.as_str()))
            .collect();
        removed.extend(self.explicit.iter());
        removed
    }

    /// Set `marked_for_removal` on every aggregate this set removes
    pub fn mark(&self, aggregates: &mut [TagAggregate]) {
        for aggregate in aggregates {
            aggregate.marked_for_removal = self.should_remove(&aggregate.namespace, &aggregate.tag);
        }
    }
}

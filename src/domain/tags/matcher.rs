//! Banned-rule matching
//!
//! A rule set shares one [`MatchMode`] and one case-sensitivity flag. Every
//! rule is tested against both the bare tag text and the qualified
//! `namespace:tag` key, so an exact rule `foo` bans `foo` in every namespace.
//! General tags have no prefix in their qualified key; only exact or
//! wildcard rules written with a literal `general:` prefix reach them
//! through a `general:tag` key.

use crate::domain::tags::parser::{format_tag, GENERAL_NAMESPACE};
use glob::Pattern;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// How banned rules are compared against tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Whole-string equality
    #[default]
    Exact,
    /// Rule appears anywhere in the tag
    Substring,
    /// Shell-style glob (`*`, `?`, `[abc]`)
    Wildcard,
    /// Unanchored regular expression search
    Regex,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(MatchMode::Exact),
            "substring" => Ok(MatchMode::Substring),
            "wildcard" | "glob" => Ok(MatchMode::Wildcard),
            "regex" => Ok(MatchMode::Regex),
            _ => Err(format!(
                "Invalid match mode: {}. Must be one of: exact, substring, wildcard, regex",
                s
            )),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchMode::Exact => "exact",
            MatchMode::Substring => "substring",
            MatchMode::Wildcard => "wildcard",
            MatchMode::Regex => "regex",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
enum CompiledRule {
    Literal(String),
    Glob(Pattern),
    Regex(Regex),
}

impl CompiledRule {
    /// Compile a single rule. Blank or malformed rules yield `None`.
    fn compile(rule: &str, mode: MatchMode, case_insensitive: bool) -> Option<Self> {
        if rule.is_empty() {
            return None;
        }

        let folded = if case_insensitive {
            rule.to_lowercase()
        } else {
            rule.to_string()
        };

        match mode {
            MatchMode::Exact | MatchMode::Substring => Some(CompiledRule::Literal(folded)),
            MatchMode::Wildcard => Pattern::new(&folded).ok().map(CompiledRule::Glob),
            MatchMode::Regex => RegexBuilder::new(rule)
                .case_insensitive(case_insensitive)
                .build()
                .ok()
                .map(CompiledRule::Regex),
        }
    }

    fn is_match(&self, candidate: &str, mode: MatchMode, case_insensitive: bool) -> bool {
        match self {
            CompiledRule::Regex(regex) => regex.is_match(candidate),
            CompiledRule::Glob(pattern) => pattern.matches(&fold_case(candidate, case_insensitive)),
            CompiledRule::Literal(rule) => {
                let candidate = fold_case(candidate, case_insensitive);
                if mode == MatchMode::Substring {
                    candidate.contains(rule.as_str())
                } else {
                    candidate == rule.as_str()
                }
            }
        }
    }
}

fn fold_case(text: &str, case_insensitive: bool) -> Cow<'_, str> {
    if case_insensitive {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    }
}

/// Test a single key against a single rule.
///
/// Invalid glob or regex rules never match.
pub fn matches(full_key: &str, rule: &str, mode: MatchMode, case_insensitive: bool) -> bool {
    CompiledRule::compile(rule, mode, case_insensitive)
        .is_some_and(|compiled| compiled.is_match(full_key, mode, case_insensitive))
}

#[derive(Debug, Clone)]
struct BannedRule {
    compiled: CompiledRule,
    /// Also tested against `general:tag` for general tags
    targets_general: bool,
}

/// A compiled set of banned rules
#[derive(Debug, Clone, Default)]
pub struct BannedRules {
    rules: Vec<String>,
    compiled: Vec<BannedRule>,
    mode: MatchMode,
    case_insensitive: bool,
}

impl BannedRules {
    /// Compile `rules` eagerly. Blank rules are skipped and malformed
    /// wildcard/regex rules are dropped with a warning.
    pub fn new<I, S>(rules: I, mode: MatchMode, case_insensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept = Vec::new();
        let mut compiled = Vec::new();

        for rule in rules {
            let rule = rule.as_ref().trim();
            if rule.is_empty() {
                continue;
            }
            match CompiledRule::compile(rule, mode, case_insensitive) {
                Some(c) => {
                    kept.push(rule.to_string());
                    compiled.push(BannedRule {
                        compiled: c,
                        targets_general: targets_general(rule, mode, case_insensitive),
                    });
                }
                None => log::warn!("Ignoring malformed {} rule: {}", mode, rule),
            }
        }

        Self {
            rules: kept,
            compiled,
            mode,
            case_insensitive,
        }
    }

    /// An empty rule set that bans nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// The rules that compiled successfully, in input order
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// True if any rule matches the bare tag or its qualified key
    pub fn is_banned(&self, namespace: &str, tag: &str) -> bool {
        if self.compiled.is_empty() {
            return false;
        }

        let qualified = format_tag(namespace, tag);
        let explicit_general =
            (namespace == GENERAL_NAMESPACE).then(|| format!("{}:{}", namespace, tag));

        self.compiled.iter().any(|rule| {
            let hit = |key: &str| rule.compiled.is_match(key, self.mode, self.case_insensitive);
            hit(tag)
                || hit(&qualified)
                || (rule.targets_general && explicit_general.as_deref().is_some_and(|key| hit(key)))
        })
    }
}

/// Rules spelled with a literal `general:` prefix, in exact or wildcard mode
fn targets_general(rule: &str, mode: MatchMode, case_insensitive: bool) -> bool {
    if !matches!(mode, MatchMode::Exact | MatchMode::Wildcard) {
        return false;
    }
    let prefix = format!("{}:", GENERAL_NAMESPACE);
    fold_case(rule, case_insensitive).starts_with(&prefix)
}

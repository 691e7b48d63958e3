//! Rule files and the patterns loaded from them.
//!
//! Format: one pattern per line. Blank lines and lines starting with `#` are
//! ignored; a leading `!` negates the pattern; `\#` and `\!` escape a literal
//! leading character. Line numbers are 1-based and refer to the original
//! text, comments included.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::MatcherCache;
use crate::pattern::{GlobMatcher, MethodPattern};

/// Raw rule text plus the name of the file it came from.
#[derive(Clone, Debug)]
pub struct RuleSource {
    /// File name shown in decisions and traces (e.g. `.gitignore`).
    pub name: String,
    /// File contents.
    pub contents: String,
}

impl RuleSource {
    /// Create a rule source.
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// One meaningful line of a rule file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleLine {
    /// Pattern text without the negation marker.
    pub pattern: String,
    /// Whether the line started with `!`.
    pub is_negation: bool,
    /// 1-based line number.
    pub line_number: usize,
}

/// Split rule-file text into pattern lines.
pub fn parse_lines(contents: &str) -> Vec<RuleLine> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            let (pattern, is_negation) = if trimmed.starts_with("\\#") || trimmed.starts_with("\\!")
            {
                (&trimmed[1..], false)
            } else if let Some(rest) = trimmed.strip_prefix('!') {
                (rest.trim_start(), true)
            } else {
                (trimmed, false)
            };
            (!pattern.is_empty()).then(|| RuleLine {
                pattern: pattern.to_owned(),
                is_negation,
                line_number: idx + 1,
            })
        })
        .collect()
}

/// The compiled matcher behind a rule, fixed by the kind of file it was
/// loaded from.
#[derive(Clone, Debug)]
pub enum RuleMatcher {
    /// Path glob (VCS-ignore and file include/exclude rules).
    File(Arc<GlobMatcher>),
    /// Method-name pattern (method include/exclude rules).
    Method(Arc<MethodPattern>),
}

/// A single loaded rule. Immutable after load.
#[derive(Clone, Debug)]
pub struct RulePattern {
    pattern: String,
    matcher: RuleMatcher,
    is_negation: bool,
    source_file: String,
    line_number: usize,
}

impl RulePattern {
    /// Pattern text without the negation marker.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Pattern text as written, with `!` for negations.
    pub fn raw(&self) -> String {
        if self.is_negation {
            format!("!{}", self.pattern)
        } else {
            self.pattern.clone()
        }
    }

    /// The compiled matcher.
    pub fn matcher(&self) -> &RuleMatcher {
        &self.matcher
    }

    /// Whether the rule re-includes (or, in an include file, rejects).
    pub fn is_negation(&self) -> bool {
        self.is_negation
    }

    /// File the rule was loaded from.
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// 1-based line number in [`source_file`](Self::source_file).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Whether the pattern failed to compile and can never match.
    pub fn is_malformed(&self) -> bool {
        match &self.matcher {
            RuleMatcher::File(g) => g.is_malformed(),
            RuleMatcher::Method(m) => m.is_malformed(),
        }
    }

    /// Test a canonical path. Always false for method rules.
    pub fn matches_path(&self, path: &str) -> bool {
        match &self.matcher {
            RuleMatcher::File(g) => g.is_match(path),
            RuleMatcher::Method(_) => false,
        }
    }

    /// Test a method name. Always false for file rules.
    pub fn matches_method(&self, name: &str, file_name: &str) -> bool {
        match &self.matcher {
            RuleMatcher::Method(m) => m.is_match(name, file_name),
            RuleMatcher::File(_) => false,
        }
    }

    /// Serializable reference to this rule.
    pub fn to_ref(&self) -> RuleRef {
        RuleRef {
            pattern: self.raw(),
            source_file: self.source_file.clone(),
            line_number: self.line_number,
            is_negation: self.is_negation,
        }
    }
}

/// Serializable identity of a rule, as reported in decisions and traces.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRef {
    /// Pattern as written (with `!` for negations).
    pub pattern: String,
    /// File the rule was loaded from.
    pub source_file: String,
    /// 1-based line number.
    pub line_number: usize,
    /// Whether the rule is a negation.
    pub is_negation: bool,
}

impl fmt::Display for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({}:{})",
            self.pattern, self.source_file, self.line_number
        )
    }
}

/// Which matcher family a rule file compiles to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RuleKind {
    File,
    Method,
}

/// The compiled patterns of one rule file, in file order.
#[derive(Clone, Debug)]
pub struct RuleFile {
    source: String,
    patterns: Vec<RulePattern>,
}

impl RuleFile {
    /// Compile a rule source, sharing matchers through `cache`.
    pub(crate) fn compile(source: &RuleSource, kind: RuleKind, cache: &mut MatcherCache) -> Self {
        let patterns: Vec<RulePattern> = parse_lines(&source.contents)
            .into_iter()
            .map(|line| {
                let matcher = match kind {
                    RuleKind::File => RuleMatcher::File(cache.glob(&line.pattern)),
                    RuleKind::Method => RuleMatcher::Method(cache.method(&line.pattern)),
                };
                RulePattern {
                    pattern: line.pattern,
                    matcher,
                    is_negation: line.is_negation,
                    source_file: source.name.clone(),
                    line_number: line.line_number,
                }
            })
            .collect();

        for rule in patterns.iter().filter(|r| r.is_malformed()) {
            warn!(
                source = %rule.source_file,
                line = rule.line_number,
                pattern = %rule.pattern,
                "malformed rule pattern will never match"
            );
        }
        debug!(source = %source.name, count = patterns.len(), "compiled rule file");

        Self {
            source: source.name.clone(),
            patterns,
        }
    }

    /// Name of the file the rules came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Patterns in file order.
    pub fn patterns(&self) -> &[RulePattern] {
        &self.patterns
    }

    /// Whether the file contributed no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// First pattern (in file order) matching a path.
    pub fn first_path_match(&self, path: &str) -> Option<&RulePattern> {
        self.patterns.iter().find(|r| r.matches_path(path))
    }

    /// First pattern (in file order) matching a method.
    pub fn first_method_match(&self, name: &str, file_name: &str) -> Option<&RulePattern> {
        self.patterns
            .iter()
            .find(|r| r.matches_method(name, file_name))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

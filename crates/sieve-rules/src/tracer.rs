//! Decision tracing for rule debugging.
//!
//! [`RuleTracer`] wraps a [`RuleResolver`] and records every decision it
//! makes together with per-pattern statistics. The tracer never decides
//! anything itself: each `trace_*` call returns exactly what the resolver
//! returned, so a trace always reproduces a real run.
//!
//! The decision log is the only mutable state in the rules crate and is local
//! to one tracer. Concurrent scans should use one tracer each, or share a
//! [`SharedRuleTracer`].
//!
//! ## Statistics
//!
//! - `matched` counts every query a pattern's text matched, deciding or not
//! - `decided` counts the queries where the pattern was the deciding rule
//! - patterns with `matched == 0` are reported as unused

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sieve_core::Candidate;
use sieve_core::path::canonicalize_lossy;

use crate::decision::{Decision, Tier};
use crate::resolver::{Partition, RuleCategory, RuleLayer, RuleMatch, RuleResolver};
use crate::rule_file::RuleRef;

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// What a traced decision was about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TraceSubject {
    /// A file path.
    File {
        /// Canonical path.
        path: String,
    },
    /// A method in a file.
    Method {
        /// Method name.
        name: String,
        /// File the method was extracted from.
        file: String,
    },
}

impl TraceSubject {
    fn category(&self) -> RuleCategory {
        match self {
            Self::File { .. } => RuleCategory::File,
            Self::Method { .. } => RuleCategory::Method,
        }
    }
}

impl std::fmt::Display for TraceSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File { path } => write!(f, "{path}"),
            Self::Method { name, file } => write!(f, "{name} in {file}"),
        }
    }
}

/// One recorded decision.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEntry {
    /// 1-based position in the log.
    pub sequence: usize,
    /// What was resolved.
    pub subject: TraceSubject,
    /// The resolver's decision, verbatim.
    pub decision: Decision,
    /// Other patterns that matched but did not decide.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub shadowed: Vec<RuleRef>,
}

/// Per-pattern counters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternStats {
    /// Layer the pattern belongs to.
    pub layer: RuleLayer,
    /// The pattern.
    pub rule: RuleRef,
    /// Queries whose subject the pattern matched.
    pub matched: u64,
    /// Queries the pattern decided.
    pub decided: u64,
    /// Decided queries that ended included.
    pub included: u64,
    /// Decided queries that ended excluded.
    pub excluded: u64,
}

/// Aggregate counts over a trace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceSummary {
    /// Decisions recorded.
    pub total: usize,
    /// Included decisions.
    pub included: usize,
    /// Excluded decisions.
    pub excluded: usize,
    /// Decisions made by the VCS-ignore layer.
    pub vcs_ignore: usize,
    /// Decisions made by category rules.
    pub category: usize,
    /// Decisions that fell through to the default.
    pub default: usize,
    /// File decisions.
    pub files: usize,
    /// Method decisions.
    pub methods: usize,
}

/// Serializable snapshot of a tracer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceReport {
    /// Aggregate counts.
    pub summary: TraceSummary,
    /// Every decision in order.
    pub entries: Vec<TraceEntry>,
    /// Statistics for every loaded pattern, in precedence order.
    pub patterns: Vec<PatternStats>,
}

type PatternKey = (RuleLayer, String, usize);

fn key(layer: RuleLayer, rule: &RuleRef) -> PatternKey {
    (layer, rule.source_file.clone(), rule.line_number)
}


// ─────────────────────────────────────────────────────────────────────────────
// RuleTracer
// ─────────────────────────────────────────────────────────────────────────────

/// Records resolver decisions and pattern statistics.
#[derive(Debug)]
pub struct RuleTracer {
    resolver: Arc<RuleResolver>,
    entries: Vec<TraceEntry>,
    stats: BTreeMap<PatternKey, PatternStats>,
    order: Vec<PatternKey>,
}

impl RuleTracer {
    /// Wrap a resolver. Every loaded pattern starts with zero counts.
    pub fn new(resolver: Arc<RuleResolver>) -> Self {
        let mut stats = BTreeMap::new();
        let mut order = Vec::new();
        for (layer, pattern) in resolver.patterns() {
            let rule = pattern.to_ref();
            let k = key(layer, &rule);
            if stats.contains_key(&k) {
                continue;
            }
            order.push(k.clone());
            let _ = stats.insert(
                k,
                PatternStats {
                    layer,
                    rule,
                    matched: 0,
                    decided: 0,
                    included: 0,
                    excluded: 0,
                },
            );
        }
        Self {
            resolver,
            entries: Vec::new(),
            stats,
            order,
        }
    }

    /// The wrapped resolver.
    pub fn resolver(&self) -> &RuleResolver {
        &self.resolver
    }

    /// Resolve and record a file path.
    pub fn trace_file(&mut self, path: &str) -> Decision {
        let decision = self.resolver.resolve_file(path);
        let matches = self.resolver.explain_file(path);
        self.record(
            TraceSubject::File {
                path: canonicalize_lossy(path),
            },
            &decision,
            matches,
        );
        decision
    }

    /// Resolve and record a method.
    pub fn trace_method(&mut self, name: &str, file_name: &str) -> Decision {
        let decision = self.resolver.resolve_method(name, file_name);
        let matches = self.resolver.explain_method(name, file_name);
        self.record(
            TraceSubject::Method {
                name: name.to_owned(),
                file: file_name.to_owned(),
            },
            &decision,
            matches,
        );
        decision
    }

    /// Traced equivalent of [`RuleResolver::partition`].
    pub fn trace_candidates(&mut self, candidates: Vec<Candidate>) -> Partition {
        let mut partition = Partition::default();
        for candidate in candidates {
            let decision = self.trace_file(&candidate.path);
            if decision.included {
                partition.kept.push(candidate);
            } else {
                partition.rejected.push((candidate, decision));
            }
        }
        partition
    }

    fn record(&mut self, subject: TraceSubject, decision: &Decision, matches: Vec<RuleMatch>) {
        let deciding = decision
            .matched_rule
            .as_ref()
            .zip(subject.category().deciding_layer(decision))
            .map(|(rule, layer)| key(layer, rule));

        let mut shadowed = Vec::new();
        for m in matches {
            let k = key(m.layer, &m.rule);
            if let Some(stats) = self.stats.get_mut(&k) {
                stats.matched += 1;
            }
            if deciding.as_ref() != Some(&k) {
                shadowed.push(m.rule);
            }
        }

        if let Some(stats) = deciding.as_ref().and_then(|k| self.stats.get_mut(k)) {
            stats.decided += 1;
            if decision.included {
                stats.included += 1;
            } else {
                stats.excluded += 1;
            }
        }

        self.entries.push(TraceEntry {
            sequence: self.entries.len() + 1,
            subject,
            decision: decision.clone(),
            shadowed,
        });
    }

    /// Recorded decisions in order.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Statistics for every loaded pattern, in precedence order.
    pub fn pattern_stats(&self) -> Vec<&PatternStats> {
        self.order.iter().filter_map(|k| self.stats.get(k)).collect()
    }

    /// Patterns that matched nothing so far.
    pub fn unused_patterns(&self) -> Vec<&PatternStats> {
        self.pattern_stats()
            .into_iter()
            .filter(|s| s.matched == 0)
            .collect()
    }

    /// Aggregate counts.
    pub fn summary(&self) -> TraceSummary {
        let mut summary = TraceSummary {
            total: self.entries.len(),
            ..TraceSummary::default()
        };
        for entry in &self.entries {
            if entry.decision.included {
                summary.included += 1;
            } else {
                summary.excluded += 1;
            }
            match entry.decision.tier {
                Tier::VcsIgnore => summary.vcs_ignore += 1,
                Tier::Category => summary.category += 1,
                Tier::Default => summary.default += 1,
            }
            match entry.subject {
                TraceSubject::File { .. } => summary.files += 1,
                TraceSubject::Method { .. } => summary.methods += 1,
            }
        }
        summary
    }

    /// Forget recorded decisions and reset counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        for stats in self.stats.values_mut() {
            stats.matched = 0;
            stats.decided = 0;
            stats.included = 0;
            stats.excluded = 0;
        }
    }

    /// Snapshot for JSON export.
    pub fn to_report(&self) -> TraceReport {
        TraceReport {
            summary: self.summary(),
            entries: self.entries.clone(),
            patterns: self.pattern_stats().into_iter().cloned().collect(),
        }
    }

    /// Pretty-printed JSON report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_report())
    }

    /// Human-readable report.
    pub fn render_text(&self) -> String {
        let summary = self.summary();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Rule trace: {} decisions ({} included, {} excluded)",
            summary.total, summary.included, summary.excluded
        );
        let _ = writeln!(
            out,
            "Tiers: vcs-ignore {}, category {}, default {}",
            summary.vcs_ignore, summary.category, summary.default
        );

        let _ = writeln!(out, "\nDecisions:");
        if self.entries.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for entry in &self.entries {
            let marker = if entry.decision.included { '+' } else { '-' };
            let _ = writeln!(
                out,
                "  {}. [{marker}] {} (tier {}) {}",
                entry.sequence,
                entry.subject,
                u8::from(entry.decision.tier),
                entry.decision.reason
            );
        }

        let stats = self.pattern_stats();
        if !stats.is_empty() {
            let _ = writeln!(out, "\nPatterns:");
            for s in &stats {
                let _ = writeln!(
                    out,
                    "  {}:{} '{}' matched {}, decided {} ({} included, {} excluded)",
                    s.rule.source_file,
                    s.rule.line_number,
                    s.rule.pattern,
                    s.matched,
                    s.decided,
                    s.included,
                    s.excluded
                );
            }
        }

        let unused = self.unused_patterns();
        if !unused.is_empty() {
            let _ = writeln!(out, "\nUnused patterns:");
            for s in unused {
                let _ = writeln!(
                    out,
                    "  {}:{} '{}'",
                    s.rule.source_file, s.rule.line_number, s.rule.pattern
                );
            }
        }

        out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SharedRuleTracer
// ─────────────────────────────────────────────────────────────────────────────

/// A tracer behind a mutex, for callers that want one log across threads.
#[derive(Clone, Debug)]
pub struct SharedRuleTracer {
    inner: Arc<Mutex<RuleTracer>>,
}

impl SharedRuleTracer {
    /// Wrap a resolver in a shared tracer.
    pub fn new(resolver: Arc<RuleResolver>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RuleTracer::new(resolver))),
        }
    }

    /// Resolve and record a file path.
    pub fn trace_file(&self, path: &str) -> Decision {
        self.inner.lock().trace_file(path)
    }

    /// Resolve and record a method.
    pub fn trace_method(&self, name: &str, file_name: &str) -> Decision {
        self.inner.lock().trace_method(name, file_name)
    }

    /// Aggregate counts.
    pub fn summary(&self) -> TraceSummary {
        self.inner.lock().summary()
    }

    /// Snapshot for JSON export.
    pub fn to_report(&self) -> TraceReport {
        self.inner.lock().to_report()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

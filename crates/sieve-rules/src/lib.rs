//! # sieve-rules
//!
//! Layered include/exclude rule resolution for files and extracted methods.
//!
//! - **Patterns**: [`GlobMatcher`] for paths, [`MethodPattern`] for method names
//! - **Rule files**: [`RuleFile`] / [`RulePattern`], loaded from [`RuleSource`]s
//! - **Resolution**: [`RuleResolver`], producing a [`Decision`] per query
//! - **Tracing**: [`RuleTracer`], which records decisions and pattern statistics
//!
//! The resolver reads no files. Callers hand it rule text and it keeps only
//! the compiled form.

#![deny(unsafe_code)]

pub mod cache;
pub mod decision;
pub mod pattern;
pub mod resolver;
pub mod rule_file;
pub mod tracer;

pub use cache::MatcherCache;
pub use decision::{Decision, FilterMode, Tier};
pub use pattern::{GlobMatcher, MethodPattern};
pub use resolver::{
    CategoryRules, Partition, RuleCategory, RuleLayer, RuleMatch, RuleResolver,
    RuleResolverBuilder,
};
pub use rule_file::{RuleFile, RuleLine, RuleMatcher, RulePattern, RuleRef, RuleSource, parse_lines};
pub use tracer::{
    PatternStats, RuleTracer, SharedRuleTracer, TraceEntry, TraceReport, TraceSubject,
    TraceSummary,
};

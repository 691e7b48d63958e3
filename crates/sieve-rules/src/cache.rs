//! Compiled-matcher cache.
//!
//! Owned by a [`RuleResolver`](crate::RuleResolver) and keyed by raw pattern
//! text. It is filled while rule files load and is read-only afterwards, so
//! a pattern that appears in several files compiles once per resolver.

use std::collections::HashMap;
use std::sync::Arc;

use crate::pattern::{GlobMatcher, MethodPattern};

/// Cache of compiled globs and method patterns.
#[derive(Debug, Default)]
pub struct MatcherCache {
    globs: HashMap<String, Arc<GlobMatcher>>,
    methods: HashMap<String, Arc<MethodPattern>>,
}

impl MatcherCache {
    /// Compiled glob for `pattern`, compiling on first use.
    pub fn glob(&mut self, pattern: &str) -> Arc<GlobMatcher> {
        Arc::clone(
            self.globs
                .entry(pattern.to_owned())
                .or_insert_with(|| Arc::new(GlobMatcher::compile(pattern))),
        )
    }

    /// Compiled method pattern for `pattern`, compiling on first use.
    pub fn method(&mut self, pattern: &str) -> Arc<MethodPattern> {
        Arc::clone(
            self.methods
                .entry(pattern.to_owned())
                .or_insert_with(|| Arc::new(MethodPattern::compile(pattern))),
        )
    }

    /// Number of distinct compiled matchers.
    pub fn len(&self) -> usize {
        self.globs.len() + self.methods.len()
    }

    /// Whether nothing has been compiled.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_pattern_compiles_once() {
        let mut cache = MatcherCache::default();
        let a = cache.glob("*.log");
        let b = cache.glob("*.log");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn globs_and_methods_are_separate() {
        let mut cache = MatcherCache::default();
        let _ = cache.glob("get*");
        let _ = cache.method("get*");
        assert_eq!(cache.len(), 2);
        assert!(!cache.is_empty());
    }
}

//! Pattern compilation shared by file rules and method rules.
//!
//! - [`GlobMatcher`]: case-sensitive path globs (`*`, `**`, `?`, `[...]`)
//!   with gitignore-style anchoring
//! - [`MethodPattern`]: case-insensitive identifier patterns, including the
//!   `Class.method` form
//!
//! Neither type can fail to compile. A malformed pattern becomes a matcher
//! that never matches, so a bad line in a rule file has no effect instead of
//! aborting a scan.

mod glob;
mod method;

pub use glob::GlobMatcher;
pub use method::MethodPattern;

/// Compile a file/VCS glob.
pub fn compile(pattern: &str) -> GlobMatcher {
    GlobMatcher::compile(pattern)
}

/// Test a canonical path against a compiled glob.
pub fn matches(path: &str, matcher: &GlobMatcher) -> bool {
    matcher.is_match(path)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

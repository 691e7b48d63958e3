//! Path globs.
//!
//! Translation happens once, to an anchored regex:
//!
//! | glob | regex | notes |
//! |------|-------|-------|
//! | `/**/` | `/(?:.*/)?` | zero or more intermediate directories |
//! | `**/` (leading) | `(?:.*/)?` | |
//! | `/**` (trailing) | `/.*` | everything below the directory |
//! | `**` | `.*` | crosses separators |
//! | `*` | `[^/]*` | stays within one component |
//! | `?` | `[^/]` | exactly one character |
//! | `[!a-z]` | `[^a-z]` | unterminated class ⇒ malformed |
//!
//! All `**` forms are swapped for placeholder characters before single `*`
//! is translated, so a `**` is never rewritten twice.
//!
//! ## Anchoring
//!
//! - A pattern containing `/` (or starting with one) is rooted: it must match
//!   the whole path or one of its ancestor directories.
//! - A pattern without `/` matches any single component, so `node_modules`
//!   excludes everything beneath any `node_modules` directory.
//! - A trailing `/` restricts the match to directories.

use regex::{Regex, RegexBuilder};

const DEEP_MIDDLE: char = '\u{1}';
const DEEP_LEADING: char = '\u{2}';
const DEEP_TRAILING: char = '\u{3}';
const DEEP_ANY: char = '\u{4}';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    /// Matches any single path component.
    Component,
    /// Matches the full path or an ancestor directory.
    Rooted,
}

/// A compiled, case-sensitive path glob.
#[derive(Clone, Debug)]
pub struct GlobMatcher {
    raw: String,
    anchor: Anchor,
    dir_only: bool,
    regex: Option<Regex>,
}

impl GlobMatcher {
    /// Compile a glob. Never fails: malformed input yields a matcher for
    /// which [`is_malformed`](Self::is_malformed) is true.
    pub fn compile(pattern: &str) -> Self {
        let trimmed = pattern.trim();
        let dir_only = trimmed.ends_with('/');
        let body = trimmed.trim_end_matches('/');
        let rooted = body.starts_with('/');
        let body = body.trim_start_matches('/');

        let anchor = if rooted || body.contains('/') {
            Anchor::Rooted
        } else {
            Anchor::Component
        };
        let regex = if body.is_empty() {
            None
        } else {
            build_regex(&translate(body), false)
        };

        Self {
            raw: pattern.to_owned(),
            anchor,
            dir_only,
            regex,
        }
    }

    /// The pattern text this matcher was compiled from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether compilation failed (the matcher never matches).
    pub fn is_malformed(&self) -> bool {
        self.regex.is_none()
    }

    /// Test a canonical POSIX-relative path.
    pub fn is_match(&self, path: &str) -> bool {
        let Some(regex) = &self.regex else {
            return false;
        };

        match self.anchor {
            Anchor::Component => {
                let mut components: Vec<&str> = path.split('/').collect();
                if self.dir_only {
                    let _ = components.pop();
                }
                components.iter().any(|c| regex.is_match(c))
            }
            Anchor::Rooted => {
                (!self.dir_only && regex.is_match(path))
                    || ancestors(path).any(|dir| regex.is_match(dir))
            }
        }
    }
}

/// Ancestor directories of a path, shallowest first (`a/b/c` → `a`, `a/b`).
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').map(move |(idx, _)| &path[..idx])
}

/// Translate a glob body into an anchored regex source.
fn translate(body: &str) -> String {
    let swapped = body
        .replace("/**/", &DEEP_MIDDLE.to_string())
        .replace("**/", &DEEP_LEADING.to_string())
        .replace("/**", &DEEP_TRAILING.to_string())
        .replace("**", &DEEP_ANY.to_string());

    let mut out = String::with_capacity(swapped.len() * 2 + 2);
    out.push('^');
    let mut chars = swapped.chars();
    while let Some(c) = chars.next() {
        match c {
            DEEP_MIDDLE => out.push_str("/(?:.*/)?"),
            DEEP_LEADING => out.push_str("(?:.*/)?"),
            DEEP_TRAILING => out.push_str("/.*"),
            DEEP_ANY => out.push_str(".*"),
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '[' => translate_class(&mut chars, &mut out),
            '\\' => match chars.next() {
                Some(next) => push_literal(&mut out, next),
                None => out.push_str(r"\\"),
            },
            other => push_literal(&mut out, other),
        }
    }
    out.push('$');
    out
}

/// Copy a `[...]` class. An unterminated class is left open so the regex
/// fails to compile.
fn translate_class(chars: &mut std::str::Chars<'_>, out: &mut String) {
    out.push('[');
    let mut first = true;
    while let Some(c) = chars.next() {
        match c {
            '!' | '^' if first => out.push('^'),
            ']' => {
                out.push(']');
                return;
            }
            '\\' => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '[' | '&' | '~' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
        first = false;
    }
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

pub(crate) fn build_regex(source: &str, case_insensitive: bool) -> Option<Regex> {
    RegexBuilder::new(source)
        .case_insensitive(case_insensitive)
        .build()
        .ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

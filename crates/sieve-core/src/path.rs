//! POSIX-relative path handling.
//!
//! Every path that reaches the rule resolver or the fitter goes through
//! [`canonicalize`] first, so pattern matching never has to care about
//! Windows separators, `./` prefixes, or doubled slashes.
//!
//! ```text
//! canonicalize("./src\\lib//mod.rs") → "src/lib/mod.rs"
//! canonicalize("/README.md")         → "README.md"
//! canonicalize("a/../../etc/passwd") → Err(OutsideRoot)
//! ```

use crate::errors::{CandidateError, Result};

/// Normalize a scanner-supplied path into its canonical POSIX-relative form.
pub fn canonicalize(raw: &str) -> Result<String> {
    let unified = raw.trim().replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(CandidateError::OutsideRoot(raw.to_owned())),
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(CandidateError::EmptyPath);
    }
    Ok(segments.join("/"))
}

/// Lenient variant used by the resolver for ad-hoc queries: falls back to
/// the separator-normalized input when the path cannot be canonicalized.
pub fn canonicalize_lossy(raw: &str) -> String {
    canonicalize(raw).unwrap_or_else(|_| raw.replace('\\', "/"))
}

/// Final path component.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Parent directory of a canonical path, `"."` for files at the root.
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or(".", |idx| &path[..idx])
}

/// Number of directory levels above the file (`src/a.rs` → 1).
pub fn depth(path: &str) -> usize {
    path.matches('/').count()
}

/// Extension of the final component without the dot, lowercased.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn extension(path: &str) -> String {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => name[idx + 1..].to_ascii_lowercase(),
    }
}

/// File name without its final extension.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn canonicalize_plain_path_unchanged() {
        assert_eq!(canonicalize("src/index.js").unwrap(), "src/index.js");
    }

    #[test]
    fn canonicalize_strips_dot_and_leading_slash() {
        assert_eq!(canonicalize("./src/a.rs").unwrap(), "src/a.rs");
        assert_eq!(canonicalize("/README.md").unwrap(), "README.md");
    }

    #[test]
    fn canonicalize_converts_backslashes() {
        assert_eq!(canonicalize("src\\util\\fmt.rs").unwrap(), "src/util/fmt.rs");
    }

    #[test]
    fn canonicalize_collapses_duplicate_separators() {
        assert_eq!(canonicalize("src//a/./b.rs").unwrap(), "src/a/b.rs");
    }

    #[test]
    fn canonicalize_rejects_parent_segments() {
        assert_matches!(canonicalize("../x.rs"), Err(CandidateError::OutsideRoot(_)));
    }

    #[test]
    fn canonicalize_rejects_empty() {
        assert_matches!(canonicalize(""), Err(CandidateError::EmptyPath));
        assert_matches!(canonicalize("./"), Err(CandidateError::EmptyPath));
    }

    #[test]
    fn lossy_keeps_unusable_input() {
        assert_eq!(canonicalize_lossy("..\\x.rs"), "../x.rs");
    }

    #[test]
    fn components() {
        assert_eq!(file_name("a/b/c.ts"), "c.ts");
        assert_eq!(file_name("c.ts"), "c.ts");
        assert_eq!(parent_dir("a/b/c.ts"), "a/b");
        assert_eq!(parent_dir("c.ts"), ".");
        assert_eq!(depth("c.ts"), 0);
        assert_eq!(depth("a/b/c.ts"), 2);
    }

    #[test]
    fn extensions_and_stems() {
        assert_eq!(extension("src/Main.RS"), "rs");
        assert_eq!(extension("Makefile"), "");
        assert_eq!(extension(".gitignore"), "");
        assert_eq!(file_stem("lib/index.test.js"), "index.test");
        assert_eq!(file_stem(".env"), ".env");
    }
}

//! Scanned candidates.
//!
//! A [`Candidate`] is the unit every sieve stage works on: the rule resolver
//! accepts or rejects it, the importance scorer ranks it, and the budget
//! fitter selects it. The scanner collaborator supplies only the path and
//! token count (plus optional size and method-token figures); everything
//! else is derived here once.

use serde::{Deserialize, Serialize};

use crate::errors::{CandidateError, Result};
use crate::path;

/// File stems that mark a conventional program entry point.
const ENTRY_POINT_STEMS: &[&str] = &["index", "main", "app"];

/// Extensions of prose documentation.
const DOC_EXTENSIONS: &[&str] = &["md", "markdown", "mdx", "rst", "adoc"];

/// Conventional top-level documents, matched on the uppercased stem.
const DOC_STEMS: &[&str] = &["README", "CHANGELOG", "LICENSE", "CONTRIBUTING"];

/// Directory names whose contents count as documentation.
const DOC_DIRS: &[&str] = &["docs", "doc"];

/// Share of a file's tokens still accounted once it is reduced to method
/// signatures (a flat 60% discount).
pub const METHODS_ONLY_RETAINED_PERCENT: u64 = 40;

/// Raw candidate record as emitted by the scanner.
///
/// `relativePath` wins over `path` when both are present.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateInput {
    /// Path as reported by the scanner.
    #[serde(default)]
    pub path: Option<String>,
    /// Root-relative path, preferred when present.
    #[serde(default)]
    pub relative_path: Option<String>,
    /// Pre-computed token count.
    #[serde(default)]
    pub tokens: u64,
    /// File size in bytes.
    #[serde(default)]
    pub size_bytes: Option<u64>,
    /// Exact token count after method extraction, when a language plugin ran.
    #[serde(default)]
    pub method_tokens: Option<u64>,
}

/// A file (or extracted method set) considered for the digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CandidateInput")]
pub struct Candidate {
    /// Canonical POSIX-relative path.
    pub path: String,
    /// Pre-computed token count.
    pub tokens: u64,
    /// File size in bytes, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Lowercased extension without the dot (empty when none).
    pub extension: String,
    /// Whether the file name is a conventional entry point.
    pub is_entry_point: bool,
    /// Exact method-only token count supplied by the extraction collaborator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_tokens: Option<u64>,
    /// Set by the methods-only strategy: the file is emitted as signatures.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub methods_only: bool,
    /// Heuristic priority 0–100, assigned per fit call and never persisted.
    #[serde(skip)]
    pub importance: u8,
}

impl Candidate {
    /// Build a candidate from a raw path and token count.
    pub fn new(raw_path: &str, tokens: u64) -> Result<Self> {
        let path = path::canonicalize(raw_path)?;
        let extension = path::extension(&path);
        let is_entry_point = is_entry_point_path(&path);
        Ok(Self {
            path,
            tokens,
            size_bytes: None,
            extension,
            is_entry_point,
            method_tokens: None,
            methods_only: false,
            importance: 0,
        })
    }

    /// Attach the file size.
    #[must_use]
    pub fn with_size_bytes(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    /// Attach an exact method-only token count.
    #[must_use]
    pub fn with_method_tokens(mut self, method_tokens: u64) -> Self {
        self.method_tokens = Some(method_tokens);
        self
    }

    /// Final path component.
    pub fn file_name(&self) -> &str {
        path::file_name(&self.path)
    }

    /// Parent directory (`"."` at the root).
    pub fn parent_dir(&self) -> &str {
        path::parent_dir(&self.path)
    }

    /// Directory levels above the file.
    pub fn depth(&self) -> usize {
        path::depth(&self.path)
    }

    /// Whether the candidate is documentation rather than code.
    pub fn is_doc(&self) -> bool {
        is_doc_path(&self.path)
    }

    /// Tokens this candidate costs against the budget.
    ///
    /// Methods-only candidates cost their exact method-token count when the
    /// extraction collaborator supplied one, otherwise 40% of the full count
    /// (rounded up).
    pub fn accounted_tokens(&self) -> u64 {
        if !self.methods_only {
            return self.tokens;
        }
        self.method_tokens
            .unwrap_or_else(|| discounted_tokens(self.tokens))
    }
}

impl TryFrom<CandidateInput> for Candidate {
    type Error = CandidateError;

    fn try_from(input: CandidateInput) -> Result<Self> {
        let raw = input
            .relative_path
            .filter(|p| !p.trim().is_empty())
            .or(input.path)
            .ok_or(CandidateError::EmptyPath)?;
        let mut candidate = Self::new(&raw, input.tokens)?;
        candidate.size_bytes = input.size_bytes;
        candidate.method_tokens = input.method_tokens;
        Ok(candidate)
    }
}

/// Whether a canonical path names a conventional entry point
/// (`index.*`, `main.*`, `app.*`).
pub fn is_entry_point_path(path: &str) -> bool {
    if path::extension(path).is_empty() {
        return false;
    }
    let stem = path::file_stem(path).to_ascii_lowercase();
    ENTRY_POINT_STEMS.contains(&stem.as_str())
}

/// Whether a canonical path is documentation: a markup extension, a file
/// under a `docs/` or `doc/` directory, or a README/CHANGELOG/LICENSE/
/// CONTRIBUTING file of any extension.
pub fn is_doc_path(path: &str) -> bool {
    if DOC_EXTENSIONS.contains(&path::extension(path).as_str()) {
        return true;
    }
    let stem = path::file_stem(path).to_ascii_uppercase();
    if DOC_STEMS.contains(&stem.as_str()) {
        return true;
    }
    path.split('/')
        .rev()
        .skip(1)
        .any(|dir| DOC_DIRS.contains(&dir.to_ascii_lowercase().as_str()))
}

fn discounted_tokens(tokens: u64) -> u64 {
    tokens
        .saturating_mul(METHODS_ONLY_RETAINED_PERCENT)
        .saturating_add(99)
        / 100
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

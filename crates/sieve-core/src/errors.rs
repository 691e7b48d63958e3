//! Candidate error types.

use thiserror::Error;

/// Errors raised while building a [`Candidate`](crate::Candidate) from
/// scanner input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CandidateError {
    /// Neither `relativePath` nor `path` carried a usable value.
    #[error("candidate has an empty path")]
    EmptyPath,
    /// The path climbs above the scan root with a `..` segment.
    #[error("candidate path escapes the scan root: {0}")]
    OutsideRoot(String),
}

/// Result type for candidate construction.
pub type Result<T> = std::result::Result<T, CandidateError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

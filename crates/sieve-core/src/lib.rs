//! # sieve-core
//!
//! Foundation types shared by every sieve crate.
//!
//! - **Candidates**: [`Candidate`], a scanned file (or extracted method set)
//!   with its pre-computed token count and derived classification
//! - **Paths**: POSIX-relative canonicalization in [`path`]
//! - **Errors**: [`CandidateError`] via `thiserror`
//! - **Logging**: [`logging::init_subscriber`] for the `tracing` stack
//!
//! Nothing in this crate reads files or counts tokens. Candidates arrive
//! pre-tokenized from an external scanner.

#![deny(unsafe_code)]

pub mod candidate;
pub mod errors;
pub mod logging;
pub mod path;

pub use candidate::{
    Candidate, CandidateInput, METHODS_ONLY_RETAINED_PERCENT, is_doc_path, is_entry_point_path,
};
pub use errors::{CandidateError, Result};

//! # sieve-budget
//!
//! Reduces a filtered candidate set to a token budget.
//!
//! - [`ImportanceScorer`]: deterministic 0–100 priority from path signals
//! - [`strategies`]: five greedy selection algorithms behind [`FitStrategy`]
//! - [`TokenBudgetFitter`]: strategy dispatch, entry-point repair, file-count
//!   bounds, and statistics
//!
//! Selection is heuristic by choice. Every step is greedy and explainable
//! rather than knapsack-optimal.

#![deny(unsafe_code)]

pub mod errors;
pub mod fitter;
pub mod scorer;
pub mod strategies;

pub use errors::{BudgetError, Result};
pub use fitter::{
    FitMetadata, FitOptions, FitResult, NO_REDUCTION_NEEDED, TokenBudgetFitter,
    recommend_strategy,
};
pub use scorer::{ImportanceScorer, ScoreBreakdown};
pub use strategies::{FitStrategy, Selection};

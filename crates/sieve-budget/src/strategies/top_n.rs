//! `topN`: greedy by importance with a hard stop.

use sieve_core::Candidate;

use super::{Budget, FitStrategy, Selection, by_importance};
use crate::errors::Result;

/// Take candidates in descending importance while they fit. The first one
/// that does not fit, and everything ranked below it, is excluded; there is
/// no backtracking.
pub fn top_n(files: &[Candidate], target_tokens: u64) -> Result<Selection> {
    let mut budget = Budget::new(FitStrategy::TopN, target_tokens);
    let mut selection = Selection::new(FitStrategy::TopN);
    let mut stopped = false;

    for file in by_importance(files) {
        if !stopped && budget.try_take(file.accounted_tokens())? {
            selection.selected.push(file);
        } else {
            stopped = true;
            selection.excluded.push(file);
        }
    }
    Ok(selection)
}

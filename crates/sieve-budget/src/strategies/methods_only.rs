//! `methodsOnly`: every file reduced to its method signatures.

use sieve_core::Candidate;

use super::{Budget, FitStrategy, Selection, by_importance};
use crate::errors::Result;

/// Flag every candidate methods-only, then take them by importance under the
/// discounted cost (see [`Candidate::accounted_tokens`]). Files that do not
/// fit are skipped and lose the flag.
pub fn methods_only(files: &[Candidate], target_tokens: u64) -> Result<Selection> {
    let mut budget = Budget::new(FitStrategy::MethodsOnly, target_tokens);
    let mut selection = Selection::new(FitStrategy::MethodsOnly);

    for mut file in by_importance(files) {
        file.methods_only = true;
        if budget.try_take(file.accounted_tokens())? {
            selection.selected.push(file);
        } else {
            file.methods_only = false;
            selection.excluded.push(file);
        }
    }
    Ok(selection)
}

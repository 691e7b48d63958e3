//! `shrinkDocs`: drop documentation before code.

use sieve_core::Candidate;

use super::{Budget, FitStrategy, Selection, by_importance, checked_add, top_n};
use crate::errors::Result;

/// Keep all code, then add documentation by importance while it fits.
///
/// Documentation is classified by [`Candidate::is_doc`]. When the code alone
/// is over budget, falls back to `topN` over the code and drops every doc.
pub fn shrink_docs(files: &[Candidate], target_tokens: u64) -> Result<Selection> {
    let (docs, code): (Vec<Candidate>, Vec<Candidate>) =
        files.iter().cloned().partition(Candidate::is_doc);

    let code_total = code.iter().try_fold(0u64, |acc, c| {
        checked_add(FitStrategy::ShrinkDocs, acc, c.accounted_tokens())
    })?;

    if code_total > target_tokens {
        let mut selection = top_n(&code, target_tokens)?;
        selection.strategy = FitStrategy::ShrinkDocs;
        selection.excluded.extend(by_importance(&docs));
        return Ok(selection);
    }

    let mut budget = Budget::new(FitStrategy::ShrinkDocs, target_tokens);
    let _ = budget.try_take(code_total)?;
    let mut selection = Selection::new(FitStrategy::ShrinkDocs);
    selection.selected = code;

    for doc in by_importance(&docs) {
        if budget.try_take(doc.accounted_tokens())? {
            selection.selected.push(doc);
        } else {
            selection.excluded.push(doc);
        }
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BudgetError;
    use crate::strategies::tests::{paths, scored};
    use assert_matches::assert_matches;

    #[test]
    fn docs_fill_leftover_budget_by_importance() {
        let files = vec![
            scored("README.md", 300, 60),
            scored("src/lib.rs", 500, 70),
            scored("docs/api.md", 100, 40),
            scored("CHANGELOG.md", 400, 30),
        ];
        let s = shrink_docs(&files, 900).unwrap();
        assert_eq!(paths(&s.selected), vec!["src/lib.rs", "README.md", "docs/api.md"]);
        assert_eq!(paths(&s.excluded), vec!["CHANGELOG.md"]);
    }

    #[test]
    fn code_over_budget_falls_back_to_top_n() {
        let files = vec![
            scored("index.js", 500, 80),
            scored("server.js", 3000, 60),
            scored("helper.js", 1000, 45),
            scored("readme.md", 2000, 50),
        ];
        let s = shrink_docs(&files, 4000).unwrap();
        assert_eq!(paths(&s.selected), vec!["index.js", "server.js"]);
        assert_eq!(paths(&s.excluded), vec!["helper.js", "readme.md"]);
        assert_eq!(s.strategy, FitStrategy::ShrinkDocs);
    }

    #[test]
    fn overflowing_docs_fail_the_strategy() {
        let files = vec![scored("a.md", u64::MAX, 50), scored("b.rs", 10, 50)];
        assert_matches!(
            shrink_docs(&files, 100),
            Err(BudgetError::TokenOverflow { strategy }) if strategy == "shrinkDocs"
        );
    }
}

//! `balanced`: directory-proportional entitlements.
//!
//! Each parent directory is entitled to `target × dir_files / total_files`
//! tokens. Directories are processed largest-first (ties in order of first
//! appearance) and, within a directory, files by descending importance. A
//! file is taken only if it fits both its directory's entitlement and the
//! remaining global budget; misfits are skipped, not terminal.

use std::collections::HashMap;

use sieve_core::Candidate;

use super::{Budget, FitStrategy, Selection, by_importance, checked_add};
use crate::errors::Result;

/// Run the balanced strategy.
pub fn balanced(files: &[Candidate], target_tokens: u64) -> Result<Selection> {
    let mut selection = Selection::new(FitStrategy::Balanced);
    if files.is_empty() {
        return Ok(selection);
    }

    let mut groups = group_by_parent(files);
    groups.sort_by_key(|(_, members)| std::cmp::Reverse(members.len()));

    let total_files = files.len();
    let mut budget = Budget::new(FitStrategy::Balanced, target_tokens);

    for (_, members) in groups {
        let entitlement = entitlement(target_tokens, members.len(), total_files);
        let mut dir_used = 0u64;
        for file in by_importance(&members) {
            let cost = file.accounted_tokens();
            let within_dir = checked_add(FitStrategy::Balanced, dir_used, cost)? <= entitlement;
            if within_dir && budget.try_take(cost)? {
                dir_used += cost;
                selection.selected.push(file);
            } else {
                selection.excluded.push(file);
            }
        }
    }
    Ok(selection)
}

/// Candidates grouped by parent directory, groups in order of first
/// appearance.
fn group_by_parent(files: &[Candidate]) -> Vec<(String, Vec<Candidate>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Candidate>)> = Vec::new();
    for file in files {
        let dir = file.parent_dir();
        let slot = *index.entry(dir).or_insert_with(|| {
            groups.push((dir.to_owned(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(file.clone());
    }
    groups
}

fn entitlement(target_tokens: u64, dir_files: usize, total_files: usize) -> u64 {
    let share = u128::from(target_tokens) * dir_files as u128 / total_files as u128;
    u64::try_from(share).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::tests::{paths, scored};

    #[test]
    fn entitlement_is_proportional() {
        assert_eq!(entitlement(1000, 1, 4), 250);
        assert_eq!(entitlement(1000, 3, 4), 750);
        assert_eq!(entitlement(u64::MAX, 2, 2), u64::MAX);
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let files = vec![
            scored("b/1.rs", 1, 0),
            scored("a/1.rs", 1, 0),
            scored("b/2.rs", 1, 0),
            scored("root.rs", 1, 0),
        ];
        let dirs: Vec<String> = group_by_parent(&files).into_iter().map(|(d, _)| d).collect();
        assert_eq!(dirs, vec!["b", "a", "."]);
    }

    #[test]
    fn one_directory_cannot_starve_another() {
        let files = vec![
            scored("src/a.rs", 300, 90),
            scored("src/b.rs", 300, 90),
            scored("src/c.rs", 300, 90),
            scored("docs/guide.md", 200, 10),
        ];
        // src entitled to 750, docs to 250
        let s = balanced(&files, 1000).unwrap();
        assert_eq!(paths(&s.selected), vec!["src/a.rs", "src/b.rs", "docs/guide.md"]);
        assert_eq!(paths(&s.excluded), vec!["src/c.rs"]);
        assert_eq!(s.total_tokens(), Some(800));
    }

    #[test]
    fn misfits_inside_a_directory_are_skipped() {
        let files = vec![scored("src/big.rs", 900, 90), scored("src/small.rs", 50, 10)];
        let s = balanced(&files, 500).unwrap();
        assert_eq!(paths(&s.selected), vec!["src/small.rs"]);
    }

    #[test]
    fn empty_input() {
        let s = balanced(&[], 100).unwrap();
        assert!(s.selected.is_empty());
        assert!(s.excluded.is_empty());
    }
}

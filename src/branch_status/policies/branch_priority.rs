use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Branch names that never count as feature branches
pub const NON_FEATURE_BRANCHES: [&str; 4] = ["main", "develop", "staging", "beta"];

/// BranchPriority policy for ordering and classifying branch names
///
/// Display order for branch columns:
/// 1. develop
/// 2. staging
/// 3. main
/// 4. everything else, alphabetically
pub struct BranchPriority;

impl BranchPriority {
    fn rank(branch: &str) -> u8 {
        match branch {
            "develop" => 0,
            "staging" => 1,
            "main" => 2,
            _ => 3,
        }
    }

    /// Compares two branch names by display priority
    pub fn compare(a: &str, b: &str) -> Ordering {
        Self::rank(a).cmp(&Self::rank(b)).then_with(|| a.cmp(b))
    }

    /// Deduplicates branch names and returns them in display order
    pub fn distinct_ordered<'a, I>(branches: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let unique: BTreeSet<&str> = branches.into_iter().map(String::as_str).collect();
        let mut ordered: Vec<String> = unique.into_iter().map(String::from).collect();
        ordered.sort_by(|a, b| Self::compare(a, b));
        ordered
    }

    /// Whether a branch counts toward the feature-branch total
    pub fn is_feature_branch(branch: &str) -> bool {
        !NON_FEATURE_BRANCHES.contains(&branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_conventional_branches_come_first() {
        let input = names(&["main", "feature/x", "staging", "develop"]);
        assert_eq!(
            BranchPriority::distinct_ordered(&input),
            names(&["develop", "staging", "main", "feature/x"])
        );
    }

    #[test]
    fn test_other_branches_sorted_alphabetically() {
        let input = names(&["release", "hotfix", "main", "beta"]);
        assert_eq!(
            BranchPriority::distinct_ordered(&input),
            names(&["main", "beta", "hotfix", "release"])
        );
    }

    #[test]
    fn test_duplicates_removed() {
        let input = names(&["main", "develop", "main", "develop"]);
        assert_eq!(
            BranchPriority::distinct_ordered(&input),
            names(&["develop", "main"])
        );
    }

    #[test]
    fn test_feature_branch_classification() {
        for conventional in NON_FEATURE_BRANCHES {
            assert!(!BranchPriority::is_feature_branch(conventional));
        }
        assert!(BranchPriority::is_feature_branch("feature/login"));
        assert!(BranchPriority::is_feature_branch("Main"));
    }
}

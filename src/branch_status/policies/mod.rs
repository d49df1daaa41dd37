pub mod branch_priority;

pub use branch_priority::{BranchPriority, NON_FEATURE_BRANCHES};

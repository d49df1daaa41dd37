pub mod project_filter;
pub mod sync_evaluator;

pub use project_filter::{DashboardFilter, ProjectFilter, SortOrder};
pub use sync_evaluator::SyncEvaluator;

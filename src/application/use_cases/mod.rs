/// Use cases module containing application business logic orchestration
mod aggregate_statuses;
mod clear_cache;
mod fetch_project_status;
mod manage_projects;
mod query_dashboard;

pub use aggregate_statuses::{AggregateStatusesUseCase, DEFAULT_MAX_CONCURRENT_FETCHES};
pub use clear_cache::{CacheClearReport, ClearCacheUseCase};
pub use fetch_project_status::{FetchOptions, FetchProjectStatusUseCase, DEFAULT_CACHE_TTL};
pub use manage_projects::ManageProjectsUseCase;
pub use query_dashboard::QueryDashboardUseCase;

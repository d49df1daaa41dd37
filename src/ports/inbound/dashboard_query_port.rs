use crate::application::dto::{DashboardRequest, DashboardResponse};
use crate::application::use_cases::CacheClearReport;
use crate::shared::Result;
use async_trait::async_trait;

/// DashboardQueryPort - Inbound port for the dashboard query interface
///
/// This port defines what driving adapters (the CLI and the HTTP API) can
/// ask of the application: a filtered, sorted view of every configured
/// project, and eviction of cached project statuses.
#[async_trait]
pub trait DashboardQueryPort: Send + Sync {
    /// Builds the dashboard for all configured projects
    ///
    /// # Arguments
    /// * `request` - Filters, sort order and optional default-branch override
    ///
    /// # Errors
    /// Returns an error if:
    /// - The project registry cannot be read
    /// - The platform fails with anything other than "not found"
    async fn query(&self, request: DashboardRequest) -> Result<DashboardResponse>;

    /// Evicts cached statuses for the given identifiers
    ///
    /// # Returns
    /// How many live cache entries were removed
    fn clear_cache(&self, identifiers: &[String]) -> usize;

    /// Evicts every cached status; returns the report of the eviction
    fn clear_all_cache(&self) -> CacheClearReport;
}

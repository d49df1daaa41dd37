use crate::application::dto::{DashboardRequest, DashboardResponse};
use crate::application::use_cases::{
    AggregateStatusesUseCase, CacheClearReport, ClearCacheUseCase,
};
use crate::branch_status::services::ProjectFilter;
use crate::ports::inbound::DashboardQueryPort;
use crate::ports::outbound::{ProgressReporter, ProjectRegistry, SourcePlatform, StatusCache};
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// QueryDashboardUseCase - Builds the filtered, sorted dashboard view
///
/// Reads the configured projects from the registry, aggregates their status
/// bundles and applies the request's filters. The distinct branch list is
/// computed over every configured project, not only the ones that survive
/// filtering, so the column set stays stable while filtering.
///
/// # Type Parameters
/// * `P` - SourcePlatform implementation
/// * `C` - StatusCache implementation
/// * `REG` - ProjectRegistry implementation
/// * `PR` - ProgressReporter implementation
pub struct QueryDashboardUseCase<P, C, REG, PR> {
    aggregator: AggregateStatusesUseCase<P, C, PR>,
    registry: Arc<REG>,
    default_branches: Vec<String>,
}

impl<P, C, REG, PR> QueryDashboardUseCase<P, C, REG, PR>
where
    P: SourcePlatform,
    C: StatusCache,
    REG: ProjectRegistry,
    PR: ProgressReporter,
{
    /// Creates a new QueryDashboardUseCase with injected dependencies
    ///
    /// # Arguments
    /// * `aggregator` - Status aggregation over the platform and cache
    /// * `registry` - Source of configured projects
    /// * `default_branches` - Branches evaluated for projects that configure none
    pub fn new(
        aggregator: AggregateStatusesUseCase<P, C, PR>,
        registry: Arc<REG>,
        default_branches: Vec<String>,
    ) -> Self {
        Self {
            aggregator,
            registry,
            default_branches,
        }
    }

    pub fn default_branches(&self) -> &[String] {
        &self.default_branches
    }

    fn cache_clearer(&self) -> ClearCacheUseCase<C> {
        ClearCacheUseCase::new(Arc::clone(self.aggregator.fetcher().cache()))
    }
}

#[async_trait]
impl<P, C, REG, PR> DashboardQueryPort for QueryDashboardUseCase<P, C, REG, PR>
where
    P: SourcePlatform,
    C: StatusCache,
    REG: ProjectRegistry,
    PR: ProgressReporter,
{
    async fn query(&self, request: DashboardRequest) -> Result<DashboardResponse> {
        let references = self.registry.list()?;
        let defaults = request
            .default_branches
            .as_deref()
            .unwrap_or(&self.default_branches);

        debug!(
            projects = references.len(),
            defaults = ?defaults,
            "building dashboard"
        );

        let statuses = self.aggregator.execute(&references, defaults).await?;
        let projects = ProjectFilter::apply(&statuses, &request.filter);
        let all_branches = ProjectFilter::all_branches(&references, defaults);

        Ok(DashboardResponse::new(
            projects,
            all_branches,
            references.len(),
        ))
    }

    fn clear_cache(&self, identifiers: &[String]) -> usize {
        self.cache_clearer().execute(identifiers).removed
    }

    fn clear_all_cache(&self) -> CacheClearReport {
        self.cache_clearer().execute_all()
    }
}

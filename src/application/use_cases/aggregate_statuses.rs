use crate::application::use_cases::FetchProjectStatusUseCase;
use crate::branch_status::domain::{ProjectReference, ProjectStatus};
use crate::ports::outbound::{ProgressReporter, SourcePlatform, StatusCache};
use crate::shared::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of projects fetched concurrently
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;

/// AggregateStatusesUseCase - Collects status bundles for many projects
///
/// Fetches are fanned out with bounded concurrency; results keep the
/// registry order regardless of which fetch finishes first. An unresolved
/// project contributes an unavailable bundle, while an upstream failure
/// fails the whole aggregation with the offending project named.
///
/// # Type Parameters
/// * `P` - SourcePlatform implementation
/// * `C` - StatusCache implementation
/// * `PR` - ProgressReporter implementation
pub struct AggregateStatusesUseCase<P, C, PR> {
    fetcher: FetchProjectStatusUseCase<P, C>,
    progress_reporter: PR,
    max_concurrent_fetches: usize,
}

impl<P, C, PR> AggregateStatusesUseCase<P, C, PR>
where
    P: SourcePlatform,
    C: StatusCache,
    PR: ProgressReporter,
{
    pub fn new(
        fetcher: FetchProjectStatusUseCase<P, C>,
        progress_reporter: PR,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            fetcher,
            progress_reporter,
            max_concurrent_fetches: max_concurrent_fetches.max(1),
        }
    }

    pub fn fetcher(&self) -> &FetchProjectStatusUseCase<P, C> {
        &self.fetcher
    }

    /// Fetches the bundle of every reference, in input order
    ///
    /// # Arguments
    /// * `references` - Projects to evaluate
    /// * `default_branches` - Branches used for references without their own list
    pub async fn execute(
        &self,
        references: &[ProjectReference],
        default_branches: &[String],
    ) -> Result<Vec<ProjectStatus>> {
        let total = references.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        self.progress_reporter
            .report(&format!("🔍 Fetching status for {} project(s)...", total));

        let completed = AtomicUsize::new(0);
        let pending: Vec<_> = references
            .iter()
            .map(|reference| self.fetch_one(reference, default_branches, &completed, total))
            .collect();

        let statuses: Vec<ProjectStatus> = stream::iter(pending)
            .buffered(self.max_concurrent_fetches)
            .try_collect()
            .await?;

        self.progress_reporter
            .report_completion(&format!("✅ Collected status for {} project(s)", total));

        Ok(statuses)
    }

    async fn fetch_one(
        &self,
        reference: &ProjectReference,
        default_branches: &[String],
        completed: &AtomicUsize,
        total: usize,
    ) -> Result<ProjectStatus> {
        let identifier = reference.identifier();
        let branches = reference.branches_or(default_branches);
        let bundle = self.fetcher.execute(identifier, branches).await?;

        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
        self.progress_reporter
            .report_progress(done, total, Some(identifier.as_str()));
        if !bundle.is_available() {
            self.progress_reporter
                .report_error(&format!("⚠️  Project not found: {}", identifier));
        }

        Ok(ProjectStatus::new(identifier.clone(), bundle))
    }
}

use crate::branch_status::domain::{BranchRecord, ProjectIdentifier, ProjectInfo, StatusBundle};
use crate::branch_status::services::SyncEvaluator;
use crate::ports::outbound::{SourcePlatform, StatusCache};
use crate::shared::error::{DashboardError, PlatformError};
use crate::shared::Result;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Default time-to-live for cached status bundles (10 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Branch roles and cache lifetime used when building a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Deployable branch whose pipeline is compared (default `main`)
    pub primary_branch: String,
    /// Shared development branch whose commit is compared (default `develop`)
    pub integration_branch: String,
    pub cache_ttl: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            primary_branch: "main".to_string(),
            integration_branch: "develop".to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// FetchProjectStatusUseCase - Fetch-or-reuse of one project's status bundle
///
/// Returns the cached bundle when present; otherwise queries the platform,
/// builds the complete bundle and stores it. Concurrent calls for the same
/// project identifier are serialized so that at most one upstream fetch per
/// key is in flight; callers that waited pick up the freshly cached bundle.
///
/// # Type Parameters
/// * `P` - SourcePlatform implementation
/// * `C` - StatusCache implementation
pub struct FetchProjectStatusUseCase<P, C> {
    platform: P,
    cache: Arc<C>,
    options: FetchOptions,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl<P, C> FetchProjectStatusUseCase<P, C>
where
    P: SourcePlatform,
    C: StatusCache,
{
    /// Creates a new FetchProjectStatusUseCase with injected dependencies
    pub fn new(platform: P, cache: Arc<C>, options: FetchOptions) -> Self {
        Self {
            platform,
            cache,
            options,
            in_flight: DashMap::new(),
        }
    }

    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    /// Returns the status bundle for `identifier`, evaluating `branches`
    ///
    /// A cached bundle is reused only when it holds a record for every
    /// requested branch; otherwise the project is fetched again and the
    /// entry replaced.
    ///
    /// # Errors
    /// Returns `DashboardError::Upstream` for any platform failure other
    /// than an unresolved project; nothing is cached in that case.
    pub async fn execute(
        &self,
        identifier: &ProjectIdentifier,
        branches: &[String],
    ) -> Result<StatusBundle> {
        let key = identifier.as_str();

        if let Some(bundle) = self.cached(key, branches) {
            debug!(project = key, "status cache hit");
            return Ok(bundle);
        }

        let slot = InFlightSlot::join(&self.in_flight, key);
        let _guard = slot.gate.lock().await;
        match self.cached(key, branches) {
            Some(bundle) => {
                debug!(project = key, "status cache filled by concurrent fetch");
                Ok(bundle)
            }
            None => self.fetch_and_store(identifier, branches).await,
        }
    }

    fn cached(&self, key: &str, branches: &[String]) -> Option<StatusBundle> {
        let bundle = self.cache.get(key)?;
        if bundle.covers_branches(branches) {
            Some(bundle)
        } else {
            debug!(project = key, "cached status lacks requested branches");
            None
        }
    }

    async fn fetch_and_store(
        &self,
        identifier: &ProjectIdentifier,
        branches: &[String],
    ) -> Result<StatusBundle> {
        debug!(project = %identifier, "status cache miss");
        let started = Instant::now();

        let project = match self.platform.project(identifier).await {
            Ok(project) => project,
            Err(PlatformError::NotFound { .. }) => {
                warn!(project = %identifier, "project not found on platform");
                return Ok(StatusBundle::unavailable(identifier));
            }
            Err(e) => return Err(upstream(identifier, e)),
        };

        let bundle = self
            .build_bundle(identifier, &project, branches)
            .await
            .map_err(|e| upstream(identifier, e))?;

        self.cache
            .set(identifier.as_str(), bundle.clone(), self.options.cache_ttl);

        info!(
            project = %identifier,
            branches = branches.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched project status"
        );

        Ok(bundle)
    }

    async fn build_bundle(
        &self,
        identifier: &ProjectIdentifier,
        project: &ProjectInfo,
        branches: &[String],
    ) -> std::result::Result<StatusBundle, PlatformError> {
        let (branch_names, open_merge_requests, integration_commit, primary_pipeline) = futures::try_join!(
            self.platform.branch_names(project),
            self.platform.open_merge_request_count(project),
            self.platform
                .latest_commit(project, &self.options.integration_branch),
            self.platform
                .latest_pipeline(project, &self.options.primary_branch),
        )?;

        let main_synced_to_develop = SyncEvaluator::main_synced_to_develop(
            primary_pipeline.as_ref(),
            integration_commit.as_ref(),
        );

        let records = futures::future::try_join_all(
            branches
                .iter()
                .map(|branch| self.branch_record(project, branch)),
        )
        .await?;

        Ok(StatusBundle::available(
            identifier,
            branch_names.len(),
            SyncEvaluator::feature_branch_count(branch_names.iter().map(String::as_str)),
            open_merge_requests,
            main_synced_to_develop,
            project.web_url.clone(),
            records,
        ))
    }

    async fn branch_record(
        &self,
        project: &ProjectInfo,
        branch: &str,
    ) -> std::result::Result<BranchRecord, PlatformError> {
        let (pipeline, commit) = futures::try_join!(
            self.platform.latest_pipeline(project, branch),
            self.platform.latest_commit(project, branch),
        )?;

        Ok(SyncEvaluator::branch_record(
            branch,
            pipeline.as_ref(),
            commit.as_ref(),
        ))
    }
}

/// A caller's membership in the single-flight table
///
/// Dropping the slot, including when the caller's future is cancelled,
/// removes the key once no other caller holds its gate.
struct InFlightSlot<'a> {
    table: &'a DashMap<String, Arc<Mutex<()>>>,
    key: &'a str,
    gate: Arc<Mutex<()>>,
}

impl<'a> InFlightSlot<'a> {
    fn join(table: &'a DashMap<String, Arc<Mutex<()>>>, key: &'a str) -> Self {
        let gate = table
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        Self { table, key, gate }
    }
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        // Held by the table and by this slot only
        self.table.remove_if(self.key, |_, gate| {
            Arc::ptr_eq(gate, &self.gate) && Arc::strong_count(gate) == 2
        });
    }
}

fn upstream(identifier: &ProjectIdentifier, error: PlatformError) -> anyhow::Error {
    DashboardError::Upstream {
        project: identifier.to_string(),
        details: error.to_string(),
    }
    .into()
}

use crate::branch_status::domain::{CommitInfo, PipelineRun, ProjectIdentifier, ProjectInfo};
use crate::shared::error::PlatformError;
use async_trait::async_trait;

/// Result type for platform calls, keeping `NotFound` distinguishable
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// SourcePlatform port for querying a hosted code-collaboration platform
///
/// This port abstracts the external API (e.g., GitLab REST v4) used to
/// read project metadata, branches, merge requests, commits and pipelines.
///
/// # Async Support
/// All methods are async so that branch lookups can run concurrently.
/// Implementations must be `Send + Sync` to support concurrent access.
///
/// # Missing data
/// `latest_commit` and `latest_pipeline` return `Ok(None)` when the branch
/// has no commits or no pipeline runs. Only `project` reports
/// `PlatformError::NotFound` for an unresolved identifier.
#[async_trait]
pub trait SourcePlatform: Send + Sync {
    /// Resolves a project by its full path
    ///
    /// # Errors
    /// - `PlatformError::NotFound` if the identifier does not resolve
    /// - `PlatformError::Upstream` for transport, auth or decoding failures
    async fn project(&self, identifier: &ProjectIdentifier) -> PlatformResult<ProjectInfo>;

    /// Lists the names of every branch in the project
    async fn branch_names(&self, project: &ProjectInfo) -> PlatformResult<Vec<String>>;

    /// Counts merge requests in the "opened" state
    async fn open_merge_request_count(&self, project: &ProjectInfo) -> PlatformResult<usize>;

    /// Most recent commit on `branch`, if any
    async fn latest_commit(
        &self,
        project: &ProjectInfo,
        branch: &str,
    ) -> PlatformResult<Option<CommitInfo>>;

    /// Most recent pipeline run on `branch`, if any
    async fn latest_pipeline(
        &self,
        project: &ProjectInfo,
        branch: &str,
    ) -> PlatformResult<Option<PipelineRun>>;
}

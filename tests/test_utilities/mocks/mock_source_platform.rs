use async_trait::async_trait;
use branch_pulse::branch_status::domain::{CommitInfo, PipelineRun, ProjectInfo};
use branch_pulse::ports::outbound::PlatformResult;
use branch_pulse::prelude::*;
use branch_pulse::shared::error::PlatformError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Platform-side data for one mock project
#[derive(Debug, Clone, Default)]
pub struct MockProject {
    pub id: u64,
    pub branches: Vec<String>,
    pub open_merge_requests: usize,
    pub commits: HashMap<String, DateTime<Utc>>,
    pub pipelines: HashMap<String, (String, DateTime<Utc>)>,
    pub fail_with_upstream: bool,
}

impl MockProject {
    pub fn new(id: u64, branches: &[&str]) -> Self {
        Self {
            id,
            branches: branches.iter().map(|b| b.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_open_merge_requests(mut self, count: usize) -> Self {
        self.open_merge_requests = count;
        self
    }

    pub fn with_commit(mut self, branch: &str, at: DateTime<Utc>) -> Self {
        self.commits.insert(branch.to_string(), at);
        self
    }

    pub fn with_pipeline(mut self, branch: &str, state: &str, at: DateTime<Utc>) -> Self {
        self.pipelines
            .insert(branch.to_string(), (state.to_string(), at));
        self
    }

    pub fn failing() -> Self {
        Self {
            fail_with_upstream: true,
            ..Default::default()
        }
    }
}

/// Mock SourcePlatform serving canned project data
///
/// Projects not registered with `with_project` resolve to `NotFound`.
#[derive(Default)]
pub struct MockSourcePlatform {
    projects: HashMap<String, MockProject>,
    delay: Duration,
    project_calls: Arc<AtomicUsize>,
}

impl MockSourcePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, path: &str, project: MockProject) -> Self {
        self.projects.insert(path.to_string(), project);
        self
    }

    /// Delays every project lookup, widening race windows in concurrency tests
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Shared handle on the lookup counter, usable after the mock is moved
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.project_calls)
    }

    fn by_id(&self, id: u64) -> PlatformResult<&MockProject> {
        self.projects
            .values()
            .find(|p| p.id == id)
            .ok_or_else(|| PlatformError::not_found(format!("projects/{}", id)))
    }
}

#[async_trait]
impl SourcePlatform for MockSourcePlatform {
    async fn project(&self, identifier: &ProjectIdentifier) -> PlatformResult<ProjectInfo> {
        self.project_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let project = self
            .projects
            .get(identifier.as_str())
            .ok_or_else(|| PlatformError::not_found(identifier.as_str()))?;
        if project.fail_with_upstream {
            return Err(PlatformError::upstream("mock upstream failure (status 500)"));
        }

        Ok(ProjectInfo {
            id: project.id,
            path_with_namespace: identifier.as_str().to_string(),
            web_url: format!("https://gitlab.example.com/{}", identifier),
        })
    }

    async fn branch_names(&self, project: &ProjectInfo) -> PlatformResult<Vec<String>> {
        Ok(self.by_id(project.id)?.branches.clone())
    }

    async fn open_merge_request_count(&self, project: &ProjectInfo) -> PlatformResult<usize> {
        Ok(self.by_id(project.id)?.open_merge_requests)
    }

    async fn latest_commit(
        &self,
        project: &ProjectInfo,
        branch: &str,
    ) -> PlatformResult<Option<CommitInfo>> {
        Ok(self
            .by_id(project.id)?
            .commits
            .get(branch)
            .map(|at| CommitInfo {
                id: format!("{}-head", branch),
                committed_at: *at,
            }))
    }

    async fn latest_pipeline(
        &self,
        project: &ProjectInfo,
        branch: &str,
    ) -> PlatformResult<Option<PipelineRun>> {
        Ok(self
            .by_id(project.id)?
            .pipelines
            .get(branch)
            .map(|(state, at)| PipelineRun {
                id: 1,
                state: state.clone(),
                updated_at: *at,
            }))
    }
}

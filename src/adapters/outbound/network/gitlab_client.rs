use crate::branch_status::domain::{CommitInfo, PipelineRun, ProjectIdentifier, ProjectInfo};
use crate::ports::outbound::{PlatformResult, SourcePlatform};
use crate::shared::error::{DashboardError, PlatformError};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Header carrying a GitLab personal or project access token
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Header GitLab uses to announce the next page of a listing
const NEXT_PAGE_HEADER: &str = "x-next-page";

#[derive(Debug, Deserialize)]
struct ApiProject {
    id: u64,
    path_with_namespace: String,
    web_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiBranch {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiCommit {
    id: String,
    committed_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ApiPipeline {
    id: u64,
    status: String,
    updated_at: DateTime<Utc>,
}

/// GitLabClient adapter for the GitLab REST API (v4)
///
/// This adapter implements the SourcePlatform port. Listings are fetched
/// page by page (`per_page=100`) following the `x-next-page` header.
///
/// # Missing data
/// A 404 on the project lookup becomes `PlatformError::NotFound`. A 404 on
/// a branch-scoped listing (deleted branch) is read as "no data" and
/// returns `Ok(None)`.
pub struct GitLabClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitLabClient {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

    /// Page size used for paginated listings
    const PER_PAGE: u32 = 100;

    /// Creates a client for the GitLab instance at `base_url`
    ///
    /// # Arguments
    /// * `base_url` - Instance root, e.g. `https://gitlab.com`
    /// * `private_token` - Access token sent as `PRIVATE-TOKEN`; anonymous if `None`
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, private_token: Option<&str>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DashboardError::Validation {
                message: format!(
                    "GitLab URL must start with http:// or https://, got '{}'",
                    base_url
                ),
            }
            .into());
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = private_token.map(str::trim).filter(|t| !t.is_empty()) {
            let mut value =
                HeaderValue::from_str(token).map_err(|_| DashboardError::Validation {
                    message: "GITLAB_PRIVATE_TOKEN contains characters not allowed in a header"
                        .to_string(),
                })?;
            value.set_sensitive(true);
            headers.insert(TOKEN_HEADER, value);
        }

        let user_agent = format!("branch-pulse/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v4/{}", self.base_url, path)
    }

    fn project_path(project: &ProjectInfo, suffix: &str) -> String {
        format!("projects/{}/{}", project.id, suffix)
    }

    /// Maps non-success statuses onto the platform error taxonomy
    fn check_status(response: Response, resource: &str) -> PlatformResult<Response> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PlatformError::not_found(resource));
        }
        if !status.is_success() {
            return Err(PlatformError::upstream(format!(
                "GitLab API returned status code {} for {}",
                status, resource
            )));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> PlatformResult<T> {
        let response = self.client.get(self.api_url(path)).query(query).send().await?;
        let response = Self::check_status(response, path)?;
        Ok(response.json::<T>().await?)
    }

    /// Fetches every page of a listing
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> PlatformResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut params = query.to_vec();
            params.push(("per_page", Self::PER_PAGE.to_string()));
            params.push(("page", page.to_string()));

            let response = self
                .client
                .get(self.api_url(path))
                .query(&params)
                .send()
                .await?;
            let response = Self::check_status(response, path)?;

            let next_page = response
                .headers()
                .get(NEXT_PAGE_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u32>().ok());

            let mut batch: Vec<T> = response.json().await?;
            let batch_len = batch.len();
            items.append(&mut batch);

            match next_page {
                Some(next) if next > page && batch_len > 0 => page = next,
                _ => break,
            }
        }

        debug!(path, items = items.len(), pages = page, "fetched paginated listing");
        Ok(items)
    }

    /// First element of a branch-scoped listing; a 404 reads as "no data"
    async fn first_for_branch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> PlatformResult<Option<T>> {
        match self.get_json::<Vec<T>>(path, query).await {
            Ok(items) => Ok(items.into_iter().next()),
            Err(PlatformError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl SourcePlatform for GitLabClient {
    async fn project(&self, identifier: &ProjectIdentifier) -> PlatformResult<ProjectInfo> {
        let path = format!("projects/{}", urlencoding::encode(identifier.as_str()));
        let project: ApiProject = self.get_json(&path, &[]).await?;
        Ok(ProjectInfo {
            id: project.id,
            path_with_namespace: project.path_with_namespace,
            web_url: project.web_url,
        })
    }

    async fn branch_names(&self, project: &ProjectInfo) -> PlatformResult<Vec<String>> {
        let branches: Vec<ApiBranch> = self
            .get_all_pages(&Self::project_path(project, "repository/branches"), &[])
            .await?;
        Ok(branches.into_iter().map(|b| b.name).collect())
    }

    async fn open_merge_request_count(&self, project: &ProjectInfo) -> PlatformResult<usize> {
        let merge_requests: Vec<IgnoredAny> = self
            .get_all_pages(
                &Self::project_path(project, "merge_requests"),
                &[("state", "opened".to_string())],
            )
            .await?;
        Ok(merge_requests.len())
    }

    async fn latest_commit(
        &self,
        project: &ProjectInfo,
        branch: &str,
    ) -> PlatformResult<Option<CommitInfo>> {
        let commit: Option<ApiCommit> = self
            .first_for_branch(
                &Self::project_path(project, "repository/commits"),
                &[
                    ("ref_name", branch.to_string()),
                    ("per_page", "1".to_string()),
                ],
            )
            .await?;
        Ok(commit.map(|c| CommitInfo {
            id: c.id,
            committed_at: c.committed_date,
        }))
    }

    async fn latest_pipeline(
        &self,
        project: &ProjectInfo,
        branch: &str,
    ) -> PlatformResult<Option<PipelineRun>> {
        let pipeline: Option<ApiPipeline> = self
            .first_for_branch(
                &Self::project_path(project, "pipelines"),
                &[
                    ("ref", branch.to_string()),
                    ("order_by", "id".to_string()),
                    ("sort", "desc".to_string()),
                    ("per_page", "1".to_string()),
                ],
            )
            .await?;
        Ok(pipeline.map(|p| PipelineRun {
            id: p.id,
            state: p.status,
            updated_at: p.updated_at,
        }))
    }
}

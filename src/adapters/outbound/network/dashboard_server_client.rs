use crate::application::use_cases::CacheClearReport;
use crate::shared::error::DashboardError;
use crate::shared::Result;
use anyhow::Context;
use serde_json::json;
use std::time::Duration;

/// Client for a running `branch-pulse serve` instance
///
/// The status cache lives inside the server process, so cache maintenance
/// from the command line goes through the server's HTTP API.
pub struct DashboardServerClient {
    client: reqwest::Client,
    base_url: String,
}

impl DashboardServerClient {
    const TIMEOUT_SECONDS: u64 = 10;

    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DashboardError::Validation {
                message: format!(
                    "Server URL must start with http:// or https://, got '{}'",
                    base_url
                ),
            }
            .into());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Asks the server to evict the given projects from its cache
    pub async fn clear_cache(&self, projects: &[String]) -> Result<CacheClearReport> {
        let url = format!("{}/api/cache/clear", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "projects": projects }))
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to reach {}\n\n💡 Hint: Start the server with `branch-pulse serve` or pass --server",
                    self.base_url
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Server returned status code {} for {}", status, url);
        }

        let report = response
            .json::<CacheClearReport>()
            .await
            .context("Failed to parse cache clear response")?;
        Ok(report)
    }
}

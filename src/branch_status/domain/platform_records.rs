use chrono::{DateTime, Utc};

/// Project metadata as resolved on the source platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub id: u64,
    pub path_with_namespace: String,
    pub web_url: String,
}

/// Latest commit on a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: String,
    pub committed_at: DateTime<Utc>,
}

/// Latest pipeline run on a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    pub id: u64,
    /// Raw platform state ("success", "failed", "running", ...)
    pub state: String,
    pub updated_at: DateTime<Utc>,
}

impl PipelineRun {
    pub const SUCCESS_STATE: &'static str = "success";

    pub fn succeeded(&self) -> bool {
        self.state == Self::SUCCESS_STATE
    }
}

use crate::branch_status::domain::{ProjectStatus, SyncState};
use serde::Serialize;

/// DashboardResponse - Response DTO from the dashboard query use case
///
/// Holds the filtered projects in display order and the branch columns
/// to render for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardResponse {
    /// Projects that passed every filter, sorted by short name
    pub projects: Vec<ProjectStatus>,
    /// Distinct branch names across all configured projects, in display order
    pub all_branches: Vec<String>,
    /// Number of configured projects before filtering
    pub total_projects: usize,
}

impl DashboardResponse {
    pub fn new(projects: Vec<ProjectStatus>, all_branches: Vec<String>, total_projects: usize) -> Self {
        Self {
            projects,
            all_branches,
            total_projects,
        }
    }

    /// Whether any listed project reports its primary branch behind integration
    pub fn has_unsynced_projects(&self) -> bool {
        self.projects
            .iter()
            .any(|p| p.bundle.main_synced_to_develop() == SyncState::NotSynced)
    }
}

use crate::branch_status::services::DashboardFilter;

/// DashboardRequest - Request DTO for the dashboard query use case
///
/// Carries the user's filters together with an optional override of the
/// default branch set used for projects that configure no branches.
#[derive(Debug, Clone, Default)]
pub struct DashboardRequest {
    pub filter: DashboardFilter,
    /// Replaces the configured default branches for this request only
    pub default_branches: Option<Vec<String>>,
}

impl DashboardRequest {
    pub fn new(filter: DashboardFilter, default_branches: Option<Vec<String>>) -> Self {
        Self {
            filter,
            default_branches: default_branches.filter(|branches| !branches.is_empty()),
        }
    }
}

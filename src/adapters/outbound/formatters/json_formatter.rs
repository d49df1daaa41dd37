use crate::application::dto::DashboardResponse;
use crate::ports::outbound::DashboardFormatter;
use crate::shared::Result;
use anyhow::Context;

/// JsonFormatter adapter rendering the dashboard as pretty-printed JSON
///
/// The document mirrors `DashboardResponse`: `projects` in display order,
/// `all_branches` and `total_projects`. Missing timestamps serialize as
/// `"not found"` and unavailable counts as `null`.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardFormatter for JsonFormatter {
    fn format(&self, response: &DashboardResponse) -> Result<String> {
        serde_json::to_string_pretty(response).context("Failed to serialize dashboard to JSON")
    }
}

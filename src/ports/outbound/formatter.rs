use crate::application::dto::DashboardResponse;
use crate::shared::Result;

/// DashboardFormatter port for rendering a dashboard response
///
/// This port abstracts the presentation format (plain-text table, JSON, ...)
/// used by the CLI and any other caller that needs a rendered view.
pub trait DashboardFormatter {
    /// Renders the filtered, sorted dashboard
    ///
    /// # Arguments
    /// * `response` - Projects to show plus the ordered branch columns
    ///
    /// # Returns
    /// Rendered content as a string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &DashboardResponse) -> Result<String>;
}

use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::DashboardFormatter;

/// Factory for creating dashboard formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Arguments
    /// * `format` - The output format to create a formatter for
    /// * `colored` - Whether table output may use ANSI colors
    ///
    /// # Examples
    /// ```
    /// use branch_pulse::application::dto::OutputFormat;
    /// use branch_pulse::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, false);
    /// ```
    pub fn create(format: OutputFormat, colored: bool) -> Box<dyn DashboardFormatter> {
        match format {
            OutputFormat::Table => Box::new(TableFormatter::with_colors(colored)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}

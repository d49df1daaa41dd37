/// Formatter adapters for the dashboard output formats
mod json_formatter;
mod table_formatter;

pub use json_formatter::JsonFormatter;
pub use table_formatter::{TableFormatter, NO_COMMIT_MARKER, NO_PIPELINE_MARKER};

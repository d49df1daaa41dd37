/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod dashboard_request;
mod dashboard_response;
mod output_format;

pub use dashboard_request::DashboardRequest;
pub use dashboard_response::DashboardResponse;
pub use output_format::OutputFormat;

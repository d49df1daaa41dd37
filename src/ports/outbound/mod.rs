/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (platform API, cache, registry, console).
pub mod formatter;
pub mod progress_reporter;
pub mod project_registry;
pub mod source_platform;
pub mod status_cache;

pub use formatter::DashboardFormatter;
pub use progress_reporter::ProgressReporter;
pub use project_registry::ProjectRegistry;
pub use source_platform::{PlatformResult, SourcePlatform};
pub use status_cache::StatusCache;

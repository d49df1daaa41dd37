/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_project_registry;
mod mock_source_platform;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_project_registry::MockProjectRegistry;
pub use mock_source_platform::{MockProject, MockSourcePlatform};

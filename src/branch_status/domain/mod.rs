pub mod platform_records;
pub mod project_reference;
pub mod project_status;
pub mod status_bundle;

pub use platform_records::{CommitInfo, PipelineRun, ProjectInfo};
pub use project_reference::{ProjectIdentifier, ProjectReference};
pub use project_status::ProjectStatus;
pub use status_bundle::{
    Availability, BranchRecord, BranchStatus, Count, StatusBundle, SyncState, Timestamp,
    DISPLAY_TIMESTAMP_FORMAT,
};

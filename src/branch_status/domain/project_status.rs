use super::project_reference::ProjectIdentifier;
use super::status_bundle::StatusBundle;
use serde::Serialize;

/// A project identifier paired with its computed status bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStatus {
    pub identifier: ProjectIdentifier,
    pub bundle: StatusBundle,
}

impl ProjectStatus {
    pub fn new(identifier: ProjectIdentifier, bundle: StatusBundle) -> Self {
        Self { identifier, bundle }
    }
}

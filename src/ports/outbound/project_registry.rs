use crate::branch_status::domain::{ProjectIdentifier, ProjectReference};
use crate::shared::Result;

/// ProjectRegistry port for the list of configured projects
///
/// The registry is the source of truth for which projects appear on the
/// dashboard and which branches are evaluated for each of them.
pub trait ProjectRegistry: Send + Sync {
    /// Returns every configured project in insertion order
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read or a stored
    /// row no longer forms a valid project reference
    fn list(&self) -> Result<Vec<ProjectReference>>;

    /// Adds a project, replacing the branch list if it already exists
    fn add(&self, reference: &ProjectReference) -> Result<()>;

    /// Removes a project; returns whether it was present
    fn remove(&self, identifier: &ProjectIdentifier) -> Result<bool>;
}

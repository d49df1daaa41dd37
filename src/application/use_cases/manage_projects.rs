use crate::branch_status::domain::{ProjectIdentifier, ProjectReference};
use crate::ports::outbound::ProjectRegistry;
use crate::shared::error::DashboardError;
use crate::shared::Result;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Entry of a legacy `projects.json` project list
#[derive(Debug, Deserialize)]
struct LegacyProjectEntry {
    name: String,
    #[serde(default)]
    branches: Vec<String>,
}

/// ManageProjectsUseCase - Maintains the list of configured projects
///
/// # Type Parameters
/// * `REG` - ProjectRegistry implementation
pub struct ManageProjectsUseCase<REG: ?Sized> {
    registry: Arc<REG>,
}

impl<REG: ProjectRegistry + ?Sized> ManageProjectsUseCase<REG> {
    pub fn new(registry: Arc<REG>) -> Self {
        Self { registry }
    }

    pub fn list(&self) -> Result<Vec<ProjectReference>> {
        self.registry.list()
    }

    /// Adds or updates a project
    ///
    /// # Arguments
    /// * `name` - Full project path, e.g. `group/repo`
    /// * `branches` - Branches to evaluate; empty means "use the defaults"
    ///
    /// # Errors
    /// Returns `DashboardError::InvalidProjectIdentifier` for a malformed name
    pub fn add(&self, name: &str, branches: Vec<String>) -> Result<ProjectReference> {
        let reference = ProjectReference::parse(name, branches)?;
        self.registry.add(&reference)?;
        info!(project = %reference.identifier(), "project saved");
        Ok(reference)
    }

    /// Removes a project; returns whether it was configured
    pub fn remove(&self, name: &str) -> Result<bool> {
        let identifier = ProjectIdentifier::new(name)?;
        let removed = self.registry.remove(&identifier)?;
        if removed {
            info!(project = %identifier, "project removed");
        }
        Ok(removed)
    }

    /// Imports projects from a JSON list of `{"name": ..., "branches": [...]}`
    ///
    /// Every entry is validated before anything is written, so a malformed
    /// file leaves the registry untouched.
    ///
    /// # Returns
    /// The number of projects imported
    pub fn import_json(&self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path).map_err(|e| DashboardError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        self.import_json_str(&content)
    }

    pub fn import_json_str(&self, content: &str) -> Result<usize> {
        let entries: Vec<LegacyProjectEntry> =
            serde_json::from_str(content).map_err(|e| DashboardError::Validation {
                message: format!("Invalid project list JSON: {}", e),
            })?;

        let references = entries
            .into_iter()
            .map(|entry| ProjectReference::parse(&entry.name, entry.branches))
            .collect::<Result<Vec<_>>>()?;

        for reference in &references {
            self.registry.add(reference)?;
        }

        info!(count = references.len(), "imported project list");
        Ok(references.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockRegistry {
        references: Mutex<Vec<ProjectReference>>,
    }

    impl ProjectRegistry for MockRegistry {
        fn list(&self) -> Result<Vec<ProjectReference>> {
            Ok(self.references.lock().unwrap().clone())
        }

        fn add(&self, reference: &ProjectReference) -> Result<()> {
            let mut references = self.references.lock().unwrap();
            match references
                .iter_mut()
                .find(|r| r.identifier() == reference.identifier())
            {
                Some(existing) => *existing = reference.clone(),
                None => references.push(reference.clone()),
            }
            Ok(())
        }

        fn remove(&self, identifier: &ProjectIdentifier) -> Result<bool> {
            let mut references = self.references.lock().unwrap();
            let before = references.len();
            references.retain(|r| r.identifier() != identifier);
            Ok(references.len() != before)
        }
    }

    fn use_case() -> ManageProjectsUseCase<MockRegistry> {
        ManageProjectsUseCase::new(Arc::new(MockRegistry::default()))
    }

    #[test]
    fn test_add_list_remove() {
        let use_case = use_case();
        use_case
            .add("team/app", vec!["main".to_string()])
            .unwrap();
        use_case.add("team/api", vec![]).unwrap();

        let listed = use_case.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].identifier().as_str(), "team/app");

        assert!(use_case.remove("team/app").unwrap());
        assert!(!use_case.remove("team/app").unwrap());
        assert_eq!(use_case.list().unwrap().len(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_identifier() {
        let err = use_case().add("team//app", vec![]).unwrap_err();
        assert!(format!("{}", err).contains("Invalid project identifier"));
    }

    #[test]
    fn test_import_json_str() {
        let use_case = use_case();
        let json = r#"[
            {"name": "team/app", "branches": ["develop", "main"]},
            {"name": "team/api"}
        ]"#;

        assert_eq!(use_case.import_json_str(json).unwrap(), 2);
        let listed = use_case.list().unwrap();
        assert_eq!(listed[0].configured_branches(), ["develop", "main"]);
        assert!(listed[1].configured_branches().is_empty());
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let use_case = use_case();
        let json = r#"[{"name": "team/app"}, {"name": "/broken"}]"#;

        assert!(use_case.import_json_str(json).is_err());
        assert!(use_case.list().unwrap().is_empty());
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        let err = use_case().import_json_str("{not json").unwrap_err();
        assert!(format!("{}", err).contains("Invalid project list JSON"));
    }

    #[test]
    fn test_import_missing_file() {
        let err = use_case()
            .import_json(Path::new("/nonexistent/projects.json"))
            .unwrap_err();
        assert!(format!("{}", err).contains("Failed to read file"));
    }
}

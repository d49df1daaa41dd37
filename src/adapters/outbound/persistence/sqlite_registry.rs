use crate::branch_status::domain::{ProjectIdentifier, ProjectReference};
use crate::ports::outbound::ProjectRegistry;
use crate::shared::error::DashboardError;
use crate::shared::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Default registry file, relative to the working directory
pub const DEFAULT_REGISTRY_PATH: &str = ".projects.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS projects (
    name TEXT PRIMARY KEY,
    branches TEXT NOT NULL DEFAULT '[]'
);
";

/// SqliteProjectRegistry adapter storing configured projects in SQLite
///
/// One row per project; the branch list is stored as a JSON array. Rows are
/// listed in insertion order, and updating an existing project keeps its
/// position.
pub struct SqliteProjectRegistry {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteProjectRegistry {
    /// Opens or creates the registry at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Self::error(path, e))?;
        }
        let conn = Connection::open(path).map_err(|e| Self::error(path, e))?;
        Self::with_connection(conn, path.to_path_buf())
    }

    /// Registry that lives only as long as the process
    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|e| Self::error(&path, e))?;
        Self::with_connection(conn, path)
    }

    fn with_connection(conn: Connection, path: PathBuf) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| Self::error(&path, e))?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(path: &Path, details: impl std::fmt::Display) -> DashboardError {
        DashboardError::Registry {
            path: path.to_path_buf(),
            details: details.to_string(),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Self::error(&self.path, "registry connection lock poisoned").into())
    }

    /// Branch list stored for `identifier`, if the project is configured
    pub fn find(&self, identifier: &ProjectIdentifier) -> Result<Option<ProjectReference>> {
        let conn = self.conn()?;
        let branches: Option<String> = conn
            .query_row(
                "SELECT branches FROM projects WHERE name = ?1",
                params![identifier.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Self::error(&self.path, e))?;

        branches
            .map(|raw| self.decode(identifier.as_str(), &raw))
            .transpose()
    }

    fn decode(&self, name: &str, branches: &str) -> Result<ProjectReference> {
        let branches: Vec<String> = serde_json::from_str(branches).map_err(|e| {
            Self::error(
                &self.path,
                format!("invalid branch list for '{}': {}", name, e),
            )
        })?;
        ProjectReference::parse(name, branches)
    }
}

impl ProjectRegistry for SqliteProjectRegistry {
    fn list(&self) -> Result<Vec<ProjectReference>> {
        let rows: Vec<(String, String)> = {
            let conn = self.conn()?;
            let mut stmt = conn
                .prepare("SELECT name, branches FROM projects ORDER BY rowid")
                .map_err(|e| Self::error(&self.path, e))?;
            let rows = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
                .map_err(|e| Self::error(&self.path, e))?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| Self::error(&self.path, e))?;
            rows
        };

        rows.iter()
            .map(|(name, branches)| self.decode(name, branches))
            .collect()
    }

    fn add(&self, reference: &ProjectReference) -> Result<()> {
        let branches = serde_json::to_string(reference.configured_branches())?;
        self.conn()?
            .execute(
                "INSERT INTO projects (name, branches) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET branches = excluded.branches",
                params![reference.identifier().as_str(), branches],
            )
            .map_err(|e| Self::error(&self.path, e))?;
        Ok(())
    }

    fn remove(&self, identifier: &ProjectIdentifier) -> Result<bool> {
        let removed = self
            .conn()?
            .execute(
                "DELETE FROM projects WHERE name = ?1",
                params![identifier.as_str()],
            )
            .map_err(|e| Self::error(&self.path, e))?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn reference(name: &str, branches: &[&str]) -> ProjectReference {
        ProjectReference::parse(name, branches.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let registry = SqliteProjectRegistry::open_in_memory().unwrap();
        registry.add(&reference("team/zeta", &[])).unwrap();
        registry.add(&reference("team/alpha", &["main"])).unwrap();
        registry.add(&reference("team/mid", &[])).unwrap();

        let names: Vec<String> = registry
            .list()
            .unwrap()
            .iter()
            .map(|r| r.identifier().to_string())
            .collect();
        assert_eq!(names, vec!["team/zeta", "team/alpha", "team/mid"]);
    }

    #[test]
    fn test_add_upserts_branches_in_place() {
        let registry = SqliteProjectRegistry::open_in_memory().unwrap();
        registry.add(&reference("team/app", &["main"])).unwrap();
        registry.add(&reference("team/api", &[])).unwrap();
        registry
            .add(&reference("team/app", &["develop", "main"]))
            .unwrap();

        let listed = registry.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].identifier().as_str(), "team/app");
        assert_eq!(listed[0].configured_branches(), ["develop", "main"]);
    }

    #[test]
    fn test_remove() {
        let registry = SqliteProjectRegistry::open_in_memory().unwrap();
        let app = reference("team/app", &[]);
        registry.add(&app).unwrap();

        assert!(registry.remove(app.identifier()).unwrap());
        assert!(!registry.remove(app.identifier()).unwrap());
        assert!(registry.list().unwrap().is_empty());
    }

    #[test]
    fn test_find() {
        let registry = SqliteProjectRegistry::open_in_memory().unwrap();
        registry.add(&reference("team/app", &["main"])).unwrap();

        let app = ProjectIdentifier::new("team/app").unwrap();
        let other = ProjectIdentifier::new("team/other").unwrap();
        assert_eq!(
            registry.find(&app).unwrap().unwrap().configured_branches(),
            ["main"]
        );
        assert!(registry.find(&other).unwrap().is_none());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("projects.db");

        {
            let registry = SqliteProjectRegistry::open(&path).unwrap();
            registry.add(&reference("team/app", &["main"])).unwrap();
        }

        let reopened = SqliteProjectRegistry::open(&path).unwrap();
        let listed = reopened.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].configured_branches(), ["main"]);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_corrupt_branch_list_is_reported() {
        let registry = SqliteProjectRegistry::open_in_memory().unwrap();
        registry
            .conn()
            .unwrap()
            .execute(
                "INSERT INTO projects (name, branches) VALUES ('team/app', 'not json')",
                [],
            )
            .unwrap();

        let err = registry.list().unwrap_err();
        assert!(format!("{}", err).contains("invalid branch list for 'team/app'"));
    }
}

use crate::shared::error::DashboardError;
use crate::shared::Result;
use serde::Serialize;

/// Maximum length for project identifiers (GitLab caps full paths well below this)
const MAX_IDENTIFIER_LENGTH: usize = 512;

/// NewType wrapper for a platform-qualified project path (`group/subgroup/repo`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProjectIdentifier(String);

impl ProjectIdentifier {
    pub fn new(identifier: impl Into<String>) -> Result<Self> {
        let identifier = identifier.into();
        let reject = |reason: &str| -> anyhow::Error {
            DashboardError::InvalidProjectIdentifier {
                identifier: identifier.clone(),
                reason: reason.to_string(),
            }
            .into()
        };

        if identifier.is_empty() {
            return Err(reject("identifier cannot be empty"));
        }
        if identifier.len() > MAX_IDENTIFIER_LENGTH {
            return Err(reject("identifier is too long"));
        }
        if identifier.starts_with('/') || identifier.ends_with('/') {
            return Err(reject("identifier must not start or end with '/'"));
        }
        if identifier.chars().any(char::is_whitespace) {
            return Err(reject("identifier must not contain whitespace"));
        }
        if identifier.split('/').any(|segment| segment.is_empty() || segment == "..") {
            return Err(reject("identifier contains an empty or '..' path segment"));
        }

        Ok(Self(identifier))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, used as the display name
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ProjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configured project and the branches to evaluate for it.
///
/// An empty branch list means "use the default branch set"; the default is
/// resolved at query time so a request can override it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReference {
    identifier: ProjectIdentifier,
    branches: Vec<String>,
}

impl ProjectReference {
    pub fn new(identifier: ProjectIdentifier, branches: Vec<String>) -> Self {
        let branches = branches
            .into_iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        Self {
            identifier,
            branches,
        }
    }

    pub fn parse(identifier: &str, branches: Vec<String>) -> Result<Self> {
        Ok(Self::new(ProjectIdentifier::new(identifier)?, branches))
    }

    pub fn identifier(&self) -> &ProjectIdentifier {
        &self.identifier
    }

    /// Branches explicitly configured for this project (may be empty)
    pub fn configured_branches(&self) -> &[String] {
        &self.branches
    }

    /// Branches to evaluate, falling back to `defaults` when none are configured
    pub fn branches_or<'a>(&'a self, defaults: &'a [String]) -> &'a [String] {
        if self.branches.is_empty() {
            defaults
        } else {
            &self.branches
        }
    }
}

use super::project_reference::ProjectIdentifier;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Display format used for timestamps in rendered output
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A non-negative count, or an explicit marker when the project could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Count {
    Known(usize),
    Unavailable,
}

impl Count {
    pub fn value(self) -> Option<usize> {
        match self {
            Count::Known(n) => Some(n),
            Count::Unavailable => None,
        }
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Count::Known(n) => write!(f, "{}", n),
            Count::Unavailable => write!(f, "N/A"),
        }
    }
}

/// Whether the primary branch pipeline has caught up with the integration branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Synced,
    NotSynced,
    Unavailable,
}

impl std::str::FromStr for SyncState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "synced" => Ok(SyncState::Synced),
            "not_synced" => Ok(SyncState::NotSynced),
            "unavailable" | "n/a" => Ok(SyncState::Unavailable),
            _ => Err(format!(
                "Invalid sync status: {}. Please specify 'synced', 'not-synced' or 'unavailable'",
                s
            )),
        }
    }
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncState::Synced => write!(f, "synced"),
            SyncState::NotSynced => write!(f, "not-synced"),
            SyncState::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Per-branch sync result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchStatus {
    Synced,
    NotSynced,
}

/// A timestamp observed on the platform, or an explicit "no data" marker.
///
/// Kept distinct from `Option` so that rendered output can tell
/// "nothing was found" apart from "the data says not synced".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    At(DateTime<Utc>),
    NotFound,
}

impl Timestamp {
    /// Human-readable form; `missing` is shown in place of an absent value
    pub fn display_or(&self, missing: &str) -> String {
        match self {
            Timestamp::At(at) => at.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
            Timestamp::NotFound => missing.to_string(),
        }
    }
}

impl From<Option<DateTime<Utc>>> for Timestamp {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map(Timestamp::At).unwrap_or(Timestamp::NotFound)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Timestamp::At(at) => serializer.serialize_str(&at.to_rfc3339()),
            Timestamp::NotFound => serializer.serialize_str("not found"),
        }
    }
}

/// Sync record for one requested branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchRecord {
    pub name: String,
    pub status: BranchStatus,
    pub pipeline_timestamp: Timestamp,
    pub commit_timestamp: Timestamp,
    /// Raw pipeline state, or "none" when the branch has no pipeline runs
    pub pipeline_state: String,
}

impl BranchRecord {
    pub const NO_PIPELINE_STATE: &'static str = "none";
}

/// Whether the bundle was computed from platform data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    ProjectNotFound,
}

/// The full computed status record for one project.
///
/// Bundles are immutable once built: a refresh always produces a new
/// bundle that replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBundle {
    short_name: String,
    availability: Availability,
    total_branch_count: Count,
    total_feature_branch_count: Count,
    open_change_request_count: Count,
    main_synced_to_develop: SyncState,
    web_url: String,
    branches: Vec<BranchRecord>,
}

impl StatusBundle {
    pub fn available(
        identifier: &ProjectIdentifier,
        total_branch_count: usize,
        total_feature_branch_count: usize,
        open_change_request_count: usize,
        main_synced_to_develop: SyncState,
        web_url: String,
        branches: Vec<BranchRecord>,
    ) -> Self {
        Self {
            short_name: identifier.short_name().to_string(),
            availability: Availability::Available,
            total_branch_count: Count::Known(total_branch_count),
            total_feature_branch_count: Count::Known(total_feature_branch_count),
            open_change_request_count: Count::Known(open_change_request_count),
            main_synced_to_develop,
            web_url,
            branches,
        }
    }

    /// Bundle for a project the platform could not resolve
    pub fn unavailable(identifier: &ProjectIdentifier) -> Self {
        Self {
            short_name: identifier.short_name().to_string(),
            availability: Availability::ProjectNotFound,
            total_branch_count: Count::Unavailable,
            total_feature_branch_count: Count::Unavailable,
            open_change_request_count: Count::Unavailable,
            main_synced_to_develop: SyncState::Unavailable,
            web_url: String::new(),
            branches: Vec::new(),
        }
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }

    pub fn total_branch_count(&self) -> Count {
        self.total_branch_count
    }

    pub fn total_feature_branch_count(&self) -> Count {
        self.total_feature_branch_count
    }

    pub fn open_change_request_count(&self) -> Count {
        self.open_change_request_count
    }

    pub fn main_synced_to_develop(&self) -> SyncState {
        self.main_synced_to_develop
    }

    pub fn web_url(&self) -> &str {
        &self.web_url
    }

    pub fn branches(&self) -> &[BranchRecord] {
        &self.branches
    }

    pub fn branch(&self, name: &str) -> Option<&BranchRecord> {
        self.branches.iter().find(|b| b.name == name)
    }

    /// Whether every name in `branches` has a record; unavailable bundles cover any set
    pub fn covers_branches(&self, branches: &[String]) -> bool {
        !self.is_available() || branches.iter().all(|name| self.branch(name).is_some())
    }
}

use crate::branch_status::domain::{ProjectReference, ProjectStatus, SyncState};
use crate::branch_status::policies::BranchPriority;

/// Sort direction for the project list (by short name, case-insensitive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(format!(
                "Invalid sort order: {}. Please specify 'asc' or 'desc'",
                s
            )),
        }
    }
}

/// Optional predicates applied to the aggregated project list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    /// Case-insensitive substring matched against identifier or short name
    pub search_query: Option<String>,
    pub min_feature_branches: Option<usize>,
    pub max_open_change_requests: Option<usize>,
    /// Equality on `main_synced_to_develop`
    pub sync_status: Option<SyncState>,
    pub sort_order: SortOrder,
}

impl DashboardFilter {
    fn has_numeric_constraint(&self) -> bool {
        self.min_feature_branches.is_some() || self.max_open_change_requests.is_some()
    }
}

/// ProjectFilter - Pure filtering and ordering of aggregated statuses
pub struct ProjectFilter;

impl ProjectFilter {
    /// Returns the projects that satisfy every active predicate, ordered by
    /// short name. Ties keep their input order in both directions.
    pub fn apply(projects: &[ProjectStatus], filter: &DashboardFilter) -> Vec<ProjectStatus> {
        let needle = filter
            .search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let mut selected: Vec<ProjectStatus> = projects
            .iter()
            .filter(|p| Self::matches(p, filter, needle.as_deref()))
            .cloned()
            .collect();

        // sort_by is stable, so equal keys stay in insertion order
        selected.sort_by(|a, b| {
            let ordering = a
                .bundle
                .short_name()
                .to_lowercase()
                .cmp(&b.bundle.short_name().to_lowercase());
            match filter.sort_order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        selected
    }

    fn matches(project: &ProjectStatus, filter: &DashboardFilter, needle: Option<&str>) -> bool {
        let bundle = &project.bundle;

        if let Some(needle) = needle {
            let in_identifier = project.identifier.as_str().to_lowercase().contains(needle);
            let in_short_name = bundle.short_name().to_lowercase().contains(needle);
            if !in_identifier && !in_short_name {
                return false;
            }
        }

        // Unavailable counts never satisfy a numeric constraint
        if filter.has_numeric_constraint() {
            if let Some(min) = filter.min_feature_branches {
                match bundle.total_feature_branch_count().value() {
                    Some(count) if count >= min => {}
                    _ => return false,
                }
            }
            if let Some(max) = filter.max_open_change_requests {
                match bundle.open_change_request_count().value() {
                    Some(count) if count <= max => {}
                    _ => return false,
                }
            }
        }

        if let Some(wanted) = filter.sync_status {
            if bundle.main_synced_to_develop() != wanted {
                return false;
            }
        }

        true
    }

    /// Distinct branch names across all configured projects, in display order
    pub fn all_branches(references: &[ProjectReference], defaults: &[String]) -> Vec<String> {
        BranchPriority::distinct_ordered(
            references
                .iter()
                .flat_map(|reference| reference.branches_or(defaults).iter()),
        )
    }
}

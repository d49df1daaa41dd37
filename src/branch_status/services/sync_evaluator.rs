use crate::branch_status::domain::{
    BranchRecord, BranchStatus, CommitInfo, PipelineRun, SyncState, Timestamp,
};
use crate::branch_status::policies::BranchPriority;

/// SyncEvaluator - Pure sync computations over platform records
///
/// All timestamps are `DateTime<Utc>`, so comparisons happen in a single
/// canonical time zone regardless of the offsets the platform reported.
pub struct SyncEvaluator;

impl SyncEvaluator {
    /// Builds the record for one branch.
    ///
    /// A branch is synced only if its latest pipeline succeeded and finished
    /// at or after its latest commit. A missing pipeline or commit leaves the
    /// branch not synced with the corresponding timestamp marked as not found.
    pub fn branch_record(
        branch: &str,
        pipeline: Option<&PipelineRun>,
        commit: Option<&CommitInfo>,
    ) -> BranchRecord {
        let status = match (pipeline, commit) {
            (Some(run), Some(commit)) if run.succeeded() && run.updated_at >= commit.committed_at => {
                BranchStatus::Synced
            }
            _ => BranchStatus::NotSynced,
        };

        BranchRecord {
            name: branch.to_string(),
            status,
            pipeline_timestamp: Timestamp::from(pipeline.map(|run| run.updated_at)),
            commit_timestamp: Timestamp::from(commit.map(|c| c.committed_at)),
            pipeline_state: pipeline
                .map(|run| run.state.clone())
                .unwrap_or_else(|| BranchRecord::NO_PIPELINE_STATE.to_string()),
        }
    }

    /// Compares the primary branch's latest pipeline with the integration
    /// branch's latest commit. Pipeline state is not considered here.
    pub fn main_synced_to_develop(
        primary_pipeline: Option<&PipelineRun>,
        integration_commit: Option<&CommitInfo>,
    ) -> SyncState {
        match (primary_pipeline, integration_commit) {
            (Some(run), Some(commit)) if run.updated_at >= commit.committed_at => SyncState::Synced,
            (Some(_), Some(_)) => SyncState::NotSynced,
            _ => SyncState::Unavailable,
        }
    }

    /// Counts branches outside the conventional set
    pub fn feature_branch_count<'a, I>(branch_names: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        branch_names
            .into_iter()
            .filter(|name| BranchPriority::is_feature_branch(name))
            .count()
    }
}

use flowdiff_types::{VersionId, WorkflowVersion};

use crate::error::HistoryResult;

/// Source of immutable workflow versions.
///
/// All implementations must satisfy these invariants:
/// - A version never changes after it is recorded.
/// - Concurrent reads are always safe.
/// - Lookups of unknown ids return `Ok(None)`, not an error.
pub trait VersionSource: Send + Sync {
    /// All versions of a workflow, in ascending version order.
    ///
    /// Returns an empty list for an unknown workflow.
    fn list_versions(&self, workflow_id: &str) -> HistoryResult<Vec<WorkflowVersion>>;

    /// Read a version by id.
    fn get_version(&self, id: &VersionId) -> HistoryResult<Option<WorkflowVersion>>;

    /// The most recent version of a workflow, if any.
    fn latest_version(&self, workflow_id: &str) -> HistoryResult<Option<WorkflowVersion>> {
        Ok(self.list_versions(workflow_id)?.pop())
    }
}

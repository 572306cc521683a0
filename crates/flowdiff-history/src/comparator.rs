//! Version-pair comparison with memoization.

use std::sync::Arc;

use flowdiff_diff::{
    compute_workflow_diff, diff_definitions, split_view, unified_view, DiffOptions, DiffResult,
    LineDiff, PatchDocument, SplitRow, UnifiedLine, WorkflowDiff,
};
use flowdiff_types::{VersionId, WorkflowDefinition, WorkflowVersion};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::ComparisonCache;
use crate::error::{HistoryError, HistoryResult};
use crate::traits::VersionSource;

/// The structural and textual diff of one version pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub diff: WorkflowDiff,
    pub lines: LineDiff,
}

impl Comparison {
    /// Diff two definitions directly, outside of any version source.
    pub fn from_definitions(
        options: &DiffOptions,
        base: &WorkflowDefinition,
        compare: &WorkflowDefinition,
        base_version: impl Into<String>,
        compare_version: impl Into<String>,
    ) -> DiffResult<Self> {
        Ok(Self {
            diff: compute_workflow_diff(base, compare, base_version, compare_version),
            lines: diff_definitions(options, base, compare)?,
        })
    }

    /// Diff two version records, labelled by their version numbers.
    pub fn from_versions(
        options: &DiffOptions,
        base: &WorkflowVersion,
        compare: &WorkflowVersion,
    ) -> DiffResult<Self> {
        Self::from_definitions(
            options,
            &base.definition,
            &compare.definition,
            base.label(),
            compare.label(),
        )
    }

    /// Lines added in the canonical text.
    pub fn additions(&self) -> usize {
        self.lines.additions()
    }

    /// Lines removed from the canonical text.
    pub fn deletions(&self) -> usize {
        self.lines.deletions()
    }

    pub fn unified(&self) -> Vec<UnifiedLine> {
        unified_view(&self.lines)
    }

    pub fn split(&self) -> Vec<SplitRow> {
        split_view(&self.lines)
    }

    /// The exportable patch for this pair.
    pub fn patch(&self) -> PatchDocument {
        PatchDocument::new(
            &self.lines,
            self.diff.base_version.as_str(),
            self.diff.compare_version.as_str(),
        )
    }
}

/// Resolves version ids through a [`VersionSource`] and memoizes the
/// resulting comparisons.
pub struct VersionComparator<S> {
    source: S,
    cache: ComparisonCache,
    options: DiffOptions,
}

impl<S: VersionSource> VersionComparator<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, DiffOptions::default())
    }

    pub fn with_options(source: S, options: DiffOptions) -> Self {
        Self {
            source,
            cache: ComparisonCache::new(),
            options,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &ComparisonCache {
        &self.cache
    }

    /// Compare two versions of the same workflow.
    ///
    /// Fails if either id is unknown or the versions belong to different
    /// workflows.
    pub fn compare(&self, base: &VersionId, compare: &VersionId) -> HistoryResult<Arc<Comparison>> {
        if let Some(hit) = self.cache.get(base, compare) {
            debug!(base = %base, compare = %compare, "comparison cache hit");
            return Ok(hit);
        }

        let base_version = self.resolve(base)?;
        let compare_version = self.resolve(compare)?;
        if base_version.workflow_id != compare_version.workflow_id {
            return Err(HistoryError::WorkflowMismatch {
                base: base_version.workflow_id,
                compare: compare_version.workflow_id,
            });
        }

        let comparison = Comparison::from_versions(&self.options, &base_version, &compare_version)?;
        debug!(
            workflow = %base_version.workflow_id,
            base = base_version.version,
            compare = compare_version.version,
            total_changes = comparison.diff.summary.total_changes,
            "computed comparison"
        );
        Ok(self.cache.insert(base.clone(), compare.clone(), comparison))
    }

    /// Compare a version against the version immediately before it.
    ///
    /// Returns `Ok(None)` for the first version of a workflow.
    pub fn compare_with_previous(&self, id: &VersionId) -> HistoryResult<Option<Arc<Comparison>>> {
        let version = self.resolve(id)?;
        let previous = self
            .source
            .list_versions(&version.workflow_id)?
            .into_iter()
            .filter(|v| v.version < version.version)
            .max_by_key(|v| v.version);

        match previous {
            Some(previous) => self.compare(&previous.id, id).map(Some),
            None => Ok(None),
        }
    }

    fn resolve(&self, id: &VersionId) -> HistoryResult<WorkflowVersion> {
        self.source
            .get_version(id)?
            .ok_or_else(|| HistoryError::VersionNotFound(id.clone()))
    }
}

impl<S> std::fmt::Debug for VersionComparator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionComparator")
            .field("cache", &self.cache)
            .field("options", &self.options)
            .finish()
    }
}

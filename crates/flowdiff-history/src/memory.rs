use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use flowdiff_types::{VersionId, WorkflowDefinition, WorkflowVersion};
use tracing::debug;

use crate::error::{HistoryError, HistoryResult};
use crate::traits::VersionSource;

#[derive(Default)]
struct Inner {
    versions: HashMap<VersionId, WorkflowVersion>,
    by_workflow: HashMap<String, Vec<VersionId>>,
}

/// In-memory, HashMap-based version store.
///
/// Intended for tests and embedding. Versions are held behind a `RwLock` for
/// safe concurrent access and cloned on read. Versions are append-only.
pub struct InMemoryVersionStore {
    inner: RwLock<Inner>,
}

impl InMemoryVersionStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    // Versions are never mutated in place, so a poisoned lock still guards
    // consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a new version of a workflow, assigning the next version number.
    pub fn record(&self, workflow_id: &str, definition: WorkflowDefinition) -> WorkflowVersion {
        let mut inner = self.write();
        let ids = inner.by_workflow.entry(workflow_id.to_string()).or_default();
        let next = u32::try_from(ids.len()).map_or(u32::MAX, |n| n.saturating_add(1));

        let version = WorkflowVersion::new(workflow_id, next, definition);
        ids.push(version.id.clone());
        inner.versions.insert(version.id.clone(), version.clone());

        debug!(workflow = workflow_id, version = next, id = %version.id, "recorded version");
        version
    }

    /// Insert an existing version record, e.g. one loaded from disk.
    ///
    /// Fails if a version with the same id is already present.
    pub fn insert(&self, version: WorkflowVersion) -> HistoryResult<()> {
        let mut inner = self.write();
        if inner.versions.contains_key(&version.id) {
            return Err(HistoryError::DuplicateVersion(version.id));
        }
        inner
            .by_workflow
            .entry(version.workflow_id.clone())
            .or_default()
            .push(version.id.clone());
        inner.versions.insert(version.id.clone(), version);
        Ok(())
    }

    /// Number of versions currently stored.
    pub fn len(&self) -> usize {
        self.read().versions.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.read().versions.is_empty()
    }

    /// Ids of all workflows with at least one version, sorted.
    pub fn workflow_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().by_workflow.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryVersionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionSource for InMemoryVersionStore {
    fn list_versions(&self, workflow_id: &str) -> HistoryResult<Vec<WorkflowVersion>> {
        let inner = self.read();
        let mut versions: Vec<WorkflowVersion> = inner
            .by_workflow
            .get(workflow_id)
            .into_iter()
            .flatten()
            .filter_map(|id| inner.versions.get(id).cloned())
            .collect();
        versions.sort_by_key(|v| v.version);
        Ok(versions)
    }

    fn get_version(&self, id: &VersionId) -> HistoryResult<Option<WorkflowVersion>> {
        Ok(self.read().versions.get(id).cloned())
    }
}

impl std::fmt::Debug for InMemoryVersionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryVersionStore")
            .field("version_count", &count)
            .finish()
    }
}

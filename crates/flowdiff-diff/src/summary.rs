//! Per-status counts over node and edge diffs.

use serde::{Deserialize, Serialize};

use crate::graph_diff::{DiffStatus, EdgeDiff, NodeDiff};

/// Counts of diff entries by category and status.
///
/// `total_changes` covers the six non-`unchanged` counts only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub nodes_added: usize,
    pub nodes_removed: usize,
    pub nodes_modified: usize,
    pub nodes_unchanged: usize,
    pub edges_added: usize,
    pub edges_removed: usize,
    pub edges_modified: usize,
    pub edges_unchanged: usize,
    pub total_changes: usize,
}

impl DiffSummary {
    /// Returns `true` if any node or edge was added, removed, or modified.
    pub fn has_changes(&self) -> bool {
        self.total_changes > 0
    }
}

/// Count node and edge diff entries by status.
pub fn summarize(node_diffs: &[NodeDiff], edge_diffs: &[EdgeDiff]) -> DiffSummary {
    let count_nodes = |status: DiffStatus| node_diffs.iter().filter(|d| d.status == status).count();
    let count_edges = |status: DiffStatus| edge_diffs.iter().filter(|d| d.status == status).count();

    let mut summary = DiffSummary {
        nodes_added: count_nodes(DiffStatus::Added),
        nodes_removed: count_nodes(DiffStatus::Removed),
        nodes_modified: count_nodes(DiffStatus::Modified),
        nodes_unchanged: count_nodes(DiffStatus::Unchanged),
        edges_added: count_edges(DiffStatus::Added),
        edges_removed: count_edges(DiffStatus::Removed),
        edges_modified: count_edges(DiffStatus::Modified),
        edges_unchanged: count_edges(DiffStatus::Unchanged),
        total_changes: 0,
    };
    summary.total_changes = summary.nodes_added
        + summary.nodes_removed
        + summary.nodes_modified
        + summary.edges_added
        + summary.edges_removed
        + summary.edges_modified;
    summary
}

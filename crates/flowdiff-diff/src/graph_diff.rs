//! Graph-level diff: compare two workflow definitions by node and edge id.
//!
//! Entities are matched by identity, never by position in the list. Output
//! order is base order first, followed by compare-only entities in compare
//! order, so identical inputs always produce identical diffs.

use std::collections::{HashMap, HashSet};

use flowdiff_types::{Edge, Node, WorkflowDefinition};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equality::optional_equal;
use crate::property_diff::{diff_properties, nodes_equal, PropertyChange};
use crate::summary::{summarize, DiffSummary};

/// Classification of a graph entity across two versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl DiffStatus {
    /// Returns `true` for every status except `Unchanged`.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// The diff of a single node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDiff {
    pub node_id: String,
    pub status: DiffStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_node: Option<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_node: Option<Node>,
    /// Present only when `status` is `Modified`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_changes: Option<Vec<PropertyChange>>,
}

/// The diff of a single edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDiff {
    pub edge_id: String,
    pub status: DiffStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_edge: Option<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_edge: Option<Edge>,
}

/// The result of comparing two workflow definitions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDiff {
    pub base_version: String,
    pub compare_version: String,
    pub summary: DiffSummary,
    pub node_diffs: Vec<NodeDiff>,
    pub edge_diffs: Vec<EdgeDiff>,
    pub settings_changed: bool,
    pub variables_changed: bool,
}

impl WorkflowDiff {
    /// Returns `true` if nothing differs between the two versions.
    pub fn is_empty(&self) -> bool {
        !self.summary.has_changes() && !self.settings_changed && !self.variables_changed
    }

    /// Look up the diff entry for a node id.
    pub fn node(&self, id: &str) -> Option<&NodeDiff> {
        self.node_diffs.iter().find(|d| d.node_id == id)
    }

    /// Look up the diff entry for an edge id.
    pub fn edge(&self, id: &str) -> Option<&EdgeDiff> {
        self.edge_diffs.iter().find(|d| d.edge_id == id)
    }

    /// Node diffs whose status is not `Unchanged`, in diff order.
    pub fn changed_nodes(&self) -> impl Iterator<Item = &NodeDiff> {
        self.node_diffs.iter().filter(|d| d.status.is_change())
    }

    /// Edge diffs whose status is not `Unchanged`, in diff order.
    pub fn changed_edges(&self) -> impl Iterator<Item = &EdgeDiff> {
        self.edge_diffs.iter().filter(|d| d.status.is_change())
    }
}

/// How an id appears across the two versions.
enum Pairing<'a, T> {
    Both(&'a T, &'a T),
    BaseOnly(&'a T),
    CompareOnly(&'a T),
}

/// Match entities by id: every base entity in base order, then the
/// compare-only entities in compare order.
fn pair_by_id<'a, T>(
    base: &'a [T],
    compare: &'a [T],
    id: impl Fn(&'a T) -> &'a str,
) -> Vec<Pairing<'a, T>> {
    let base_ids: HashSet<&str> = base.iter().map(&id).collect();
    let compare_by_id: HashMap<&str, &T> = compare.iter().map(|item| (id(item), item)).collect();

    let mut pairs: Vec<Pairing<'a, T>> = base
        .iter()
        .map(|item| match compare_by_id.get(id(item)) {
            Some(other) => Pairing::Both(item, *other),
            None => Pairing::BaseOnly(item),
        })
        .collect();

    pairs.extend(
        compare
            .iter()
            .filter(|item| !base_ids.contains(id(*item)))
            .map(Pairing::CompareOnly),
    );

    pairs
}

fn diff_node(pairing: Pairing<'_, Node>) -> NodeDiff {
    match pairing {
        Pairing::Both(base, compare) => {
            let modified = !nodes_equal(base, compare);
            NodeDiff {
                node_id: base.id.clone(),
                status: if modified {
                    DiffStatus::Modified
                } else {
                    DiffStatus::Unchanged
                },
                base_node: Some(base.clone()),
                compare_node: Some(compare.clone()),
                property_changes: modified.then(|| diff_properties(base, compare)),
            }
        }
        Pairing::BaseOnly(base) => NodeDiff {
            node_id: base.id.clone(),
            status: DiffStatus::Removed,
            base_node: Some(base.clone()),
            compare_node: None,
            property_changes: None,
        },
        Pairing::CompareOnly(compare) => NodeDiff {
            node_id: compare.id.clone(),
            status: DiffStatus::Added,
            base_node: None,
            compare_node: Some(compare.clone()),
            property_changes: None,
        },
    }
}

fn diff_edge(pairing: Pairing<'_, Edge>) -> EdgeDiff {
    match pairing {
        Pairing::Both(base, compare) => EdgeDiff {
            edge_id: base.id.clone(),
            status: if base == compare {
                DiffStatus::Unchanged
            } else {
                DiffStatus::Modified
            },
            base_edge: Some(base.clone()),
            compare_edge: Some(compare.clone()),
        },
        Pairing::BaseOnly(base) => EdgeDiff {
            edge_id: base.id.clone(),
            status: DiffStatus::Removed,
            base_edge: Some(base.clone()),
            compare_edge: None,
        },
        Pairing::CompareOnly(compare) => EdgeDiff {
            edge_id: compare.id.clone(),
            status: DiffStatus::Added,
            base_edge: None,
            compare_edge: Some(compare.clone()),
        },
    }
}

/// Compare two workflow definitions and produce a structured diff.
///
/// `base_version` and `compare_version` are opaque labels carried into the
/// result. Settings and variables are reported only as changed/unchanged
/// flags.
pub fn compute_workflow_diff(
    base: &WorkflowDefinition,
    compare: &WorkflowDefinition,
    base_version: impl Into<String>,
    compare_version: impl Into<String>,
) -> WorkflowDiff {
    let node_diffs: Vec<NodeDiff> = pair_by_id(&base.nodes, &compare.nodes, |n| n.id.as_str())
        .into_iter()
        .map(diff_node)
        .collect();

    let edge_diffs: Vec<EdgeDiff> = pair_by_id(&base.edges, &compare.edges, |e| e.id.as_str())
        .into_iter()
        .map(diff_edge)
        .collect();

    let summary = summarize(&node_diffs, &edge_diffs);
    let diff = WorkflowDiff {
        base_version: base_version.into(),
        compare_version: compare_version.into(),
        summary,
        node_diffs,
        edge_diffs,
        settings_changed: !optional_equal(base.settings.as_ref(), compare.settings.as_ref()),
        variables_changed: !optional_equal(base.variables.as_ref(), compare.variables.as_ref()),
    };

    debug!(
        base = %diff.base_version,
        compare = %diff.compare_version,
        total_changes = diff.summary.total_changes,
        settings_changed = diff.settings_changed,
        variables_changed = diff.variables_changed,
        "computed workflow diff"
    );

    diff
}

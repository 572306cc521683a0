//! Property-level diff: field changes on a node present in both versions.
//!
//! A node's comparable content is its `type`, its `position`, and each key of
//! its `data` map. [`nodes_equal`] and [`diff_properties`] look at exactly
//! these fields, so a node classified as modified always has at least one
//! property change.

use std::collections::BTreeSet;

use flowdiff_types::{Node, Position};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::equality::{deep_equal, map_equal};

/// How a single property differs between two versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
}

/// A single field-level difference on a modified node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyChange {
    /// Dotted field locator, e.g. `data.label` or `position`.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_value: Option<Value>,
    pub change_type: ChangeType,
}

impl PropertyChange {
    fn added(path: String, value: Value) -> Self {
        Self {
            path,
            base_value: None,
            compare_value: Some(value),
            change_type: ChangeType::Added,
        }
    }

    fn removed(path: String, value: Value) -> Self {
        Self {
            path,
            base_value: Some(value),
            compare_value: None,
            change_type: ChangeType::Removed,
        }
    }

    fn modified(path: String, old: Value, new: Value) -> Self {
        Self {
            path,
            base_value: Some(old),
            compare_value: Some(new),
            change_type: ChangeType::Modified,
        }
    }
}

/// Returns `true` if two nodes have the same comparable content.
///
/// Identity (`id`) is not compared.
pub fn nodes_equal(base: &Node, compare: &Node) -> bool {
    base.kind == compare.kind
        && base.position == compare.position
        && map_equal(&base.data, &compare.data)
}

/// Compute the field-level changes between two versions of a node.
///
/// Changes are reported in a fixed order: `type`, then `position` (as one
/// field, never split into `x`/`y`), then `data.<key>` for each differing
/// data key in sorted key order.
pub fn diff_properties(base: &Node, compare: &Node) -> Vec<PropertyChange> {
    let mut changes = Vec::new();

    if base.kind != compare.kind {
        changes.push(PropertyChange::modified(
            "type".into(),
            Value::String(base.kind.clone()),
            Value::String(compare.kind.clone()),
        ));
    }

    if base.position != compare.position {
        changes.push(PropertyChange::modified(
            "position".into(),
            position_value(&base.position),
            position_value(&compare.position),
        ));
    }

    let keys: BTreeSet<&String> = base.data.keys().chain(compare.data.keys()).collect();
    for key in keys {
        let path = format!("data.{key}");
        match (base.data.get(key), compare.data.get(key)) {
            (None, Some(new)) => changes.push(PropertyChange::added(path, new.clone())),
            (Some(old), None) => changes.push(PropertyChange::removed(path, old.clone())),
            (Some(old), Some(new)) if !deep_equal(old, new) => {
                changes.push(PropertyChange::modified(path, old.clone(), new.clone()));
            }
            _ => {}
        }
    }

    changes
}

fn position_value(position: &Position) -> Value {
    json!({ "x": position.x, "y": position.y })
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::TypeError;

/// A versioned workflow graph.
///
/// Every field is optional on the wire: missing `nodes`/`edges` decode as
/// empty lists. A missing `settings`/`variables` decodes as `None`, while an
/// explicit `null` decodes as `Some(Value::Null)`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

/// Wraps any field that appears on the wire in `Some`, including `null`.
/// Paired with `#[serde(default)]`, only an absent field stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl WorkflowDefinition {
    /// Create a definition from nodes and edges, with no settings or variables.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            settings: None,
            variables: None,
        }
    }

    /// Parse a definition from JSON text.
    pub fn from_json(text: &str) -> Result<Self, TypeError> {
        serde_json::from_str(text).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Returns `true` if the graph has no nodes and no edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Deterministic text form used for line diffs.
    ///
    /// Object keys are emitted in sorted order with two-space indentation,
    /// and the text always ends with a newline, so two definitions with the
    /// same content always serialize to the same bytes.
    pub fn canonical_text(&self) -> Result<String, TypeError> {
        let value =
            serde_json::to_value(self).map_err(|e| TypeError::Serialization(e.to_string()))?;
        let mut text = serde_json::to_string_pretty(&value)
            .map_err(|e| TypeError::Serialization(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }
}

/// A node in the workflow graph. `id` is its identity; every other field is
/// comparable content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub position: Position,
    /// Label and configuration, opaque to the diff engine.
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            position: Position::default(),
            data: Map::new(),
        }
    }

    /// Builder-style position setter.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Builder-style data field setter.
    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// The `label` data field, if it is a string.
    pub fn label(&self) -> Option<&str> {
        self.data.get("label").and_then(Value::as_str)
    }
}

/// Canvas coordinates of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A directed connection between two nodes.
///
/// The optional string fields keep three states: absent (`None`), explicit
/// `null` (`Some(None)`), and set (`Some(Some(_))`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub label: Option<Option<String>>,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            label: None,
        }
    }

    /// Builder-style label setter.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(Some(label.into()));
        self
    }

    /// Builder-style handle setter.
    pub fn with_handles(
        mut self,
        source_handle: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> Self {
        self.source_handle = Some(Some(source_handle.into()));
        self.target_handle = Some(Some(target_handle.into()));
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_ref().and_then(Option::as_deref)
    }

    pub fn source_handle(&self) -> Option<&str> {
        self.source_handle.as_ref().and_then(Option::as_deref)
    }

    pub fn target_handle(&self) -> Option<&str> {
        self.target_handle.as_ref().and_then(Option::as_deref)
    }
}

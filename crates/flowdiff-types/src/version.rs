use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::workflow::WorkflowDefinition;

/// Unique identifier for a stored workflow version (UUID v7 for time-ordering).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionId(uuid::Uuid);

impl VersionId {
    /// Generate a new time-ordered version ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Short representation (first 8 characters of UUID).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for VersionId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for VersionId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidVersionId(format!("{s}: {e}")))
    }
}

impl fmt::Debug for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionId({})", self.short_id())
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable, persisted snapshot of a workflow definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowVersion {
    pub id: VersionId,
    /// Identity namespace the version belongs to.
    pub workflow_id: String,
    /// Monotonic version number within the workflow, starting at 1.
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub definition: WorkflowDefinition,
}

impl WorkflowVersion {
    pub fn new(workflow_id: impl Into<String>, version: u32, definition: WorkflowDefinition) -> Self {
        Self {
            id: VersionId::new(),
            workflow_id: workflow_id.into(),
            version,
            created_at: Utc::now(),
            definition,
        }
    }

    /// The human-facing label used in diff headers (`v<label>`).
    pub fn label(&self) -> String {
        self.version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_ids_are_unique() {
        let a = VersionId::new();
        let b = VersionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn parse_version_id() {
        let id = VersionId::new();
        let parsed: VersionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_invalid_version_id() {
        let err = "not-a-uuid".parse::<VersionId>().unwrap_err();
        assert!(matches!(err, TypeError::InvalidVersionId(_)));
    }

    #[test]
    fn short_id_length() {
        assert_eq!(VersionId::new().short_id().len(), 8);
    }

    #[test]
    fn record_uses_camel_case() {
        let version = WorkflowVersion::new("wf-1", 3, WorkflowDefinition::default());
        let json = serde_json::to_value(&version).unwrap();
        assert_eq!(json["workflowId"], "wf-1");
        assert_eq!(json["version"], 3);
        assert!(json.get("createdAt").is_some());
        assert_eq!(version.label(), "3");
    }
}

use std::path::Path;

use anyhow::Context;
use flowdiff_types::{WorkflowDefinition, WorkflowVersion};
use serde::Deserialize;

/// A version file is either a full version record or a bare definition.
#[derive(Deserialize)]
#[serde(untagged)]
enum InputDocument {
    Version(WorkflowVersion),
    Definition(WorkflowDefinition),
}

/// A definition read from disk together with the label it is diffed under.
#[derive(Debug)]
pub struct LoadedInput {
    pub label: String,
    pub workflow_id: Option<String>,
    pub definition: WorkflowDefinition,
}

/// Read a version file. Version records carry their own label; bare
/// definitions use `fallback_label`.
pub fn load_input(path: &Path, fallback_label: &str) -> anyhow::Result<LoadedInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_input(&text, fallback_label).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_input(text: &str, fallback_label: &str) -> anyhow::Result<LoadedInput> {
    let loaded = match serde_json::from_str::<InputDocument>(text)? {
        InputDocument::Version(version) => LoadedInput {
            label: version.label(),
            workflow_id: Some(version.workflow_id),
            definition: version.definition,
        },
        InputDocument::Definition(definition) => LoadedInput {
            label: fallback_label.to_string(),
            workflow_id: None,
            definition,
        },
    };
    Ok(loaded)
}

/// Load both sides of a comparison, refusing pairs from different workflows.
pub fn load_pair(
    base: &Path,
    compare: &Path,
    base_label: &str,
    compare_label: &str,
) -> anyhow::Result<(LoadedInput, LoadedInput)> {
    let base = load_input(base, base_label)?;
    let compare = load_input(compare, compare_label)?;
    if let (Some(a), Some(b)) = (&base.workflow_id, &compare.workflow_id) {
        anyhow::ensure!(a == b, "versions belong to different workflows: {a} vs {b}");
    }
    Ok((base, compare))
}

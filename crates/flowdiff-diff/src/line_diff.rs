//! Line-level diff of two texts, grouped into runs.
//!
//! Uses the `similar` crate (Myers diff algorithm by default) to produce the
//! minimal line edit script, then merges consecutive lines of the same kind
//! into [`LineDiffSegment`] runs. Segment text keeps its line terminators, so
//! concatenating segments reconstructs either input exactly.

use flowdiff_types::WorkflowDefinition;
use serde::{Deserialize, Serialize};
use similar::{Algorithm, ChangeTag, TextDiff};

use crate::error::DiffResult;

/// Classification of a line in a line diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Added,
    Removed,
    Unchanged,
}

impl LineKind {
    /// Single-character marker used by the unified view.
    pub fn marker(&self) -> char {
        match self {
            Self::Added => '+',
            Self::Removed => '-',
            Self::Unchanged => ' ',
        }
    }
}

impl From<ChangeTag> for LineKind {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => Self::Unchanged,
            ChangeTag::Delete => Self::Removed,
            ChangeTag::Insert => Self::Added,
        }
    }
}

/// A maximal run of consecutive lines sharing one classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiffSegment {
    pub kind: LineKind,
    /// The run's lines, each with its original terminator.
    pub text: String,
}

impl LineDiffSegment {
    /// The run's lines without terminators.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }

    /// Number of lines in the run. A final terminator does not add a line.
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// The result of diffing two texts line by line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiff {
    pub segments: Vec<LineDiffSegment>,
}

impl LineDiff {
    /// Returns `true` if the two texts were identical.
    pub fn is_identical(&self) -> bool {
        self.segments.iter().all(|s| s.kind == LineKind::Unchanged)
    }

    /// Total number of added lines.
    pub fn additions(&self) -> usize {
        self.count(LineKind::Added)
    }

    /// Total number of removed lines.
    pub fn deletions(&self) -> usize {
        self.count(LineKind::Removed)
    }

    fn count(&self, kind: LineKind) -> usize {
        self.segments
            .iter()
            .filter(|s| s.kind == kind)
            .map(LineDiffSegment::line_count)
            .sum()
    }

    /// Every line of the diff in sequence order, with its classification.
    pub fn lines(&self) -> impl Iterator<Item = (LineKind, &str)> + '_ {
        self.segments
            .iter()
            .flat_map(|s| s.lines().map(move |line| (s.kind, line)))
    }

    /// Rebuild the base text from unchanged and removed runs.
    pub fn base_text(&self) -> String {
        self.collect_text(LineKind::Removed)
    }

    /// Rebuild the compare text from unchanged and added runs.
    pub fn compare_text(&self) -> String {
        self.collect_text(LineKind::Added)
    }

    fn collect_text(&self, side: LineKind) -> String {
        self.segments
            .iter()
            .filter(|s| s.kind == LineKind::Unchanged || s.kind == side)
            .map(|s| s.text.as_str())
            .collect()
    }
}

/// Line diff algorithm selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<LineAlgorithm> for Algorithm {
    fn from(algorithm: LineAlgorithm) -> Self {
        match algorithm {
            LineAlgorithm::Myers => Algorithm::Myers,
            LineAlgorithm::Patience => Algorithm::Patience,
            LineAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

/// Tunables for the line diff.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    #[serde(default)]
    pub algorithm: LineAlgorithm,
}

/// Compute a line diff between two texts with the default options.
pub fn diff_lines(base: &str, compare: &str) -> LineDiff {
    diff_lines_with(&DiffOptions::default(), base, compare)
}

/// Compute a line diff between two texts.
pub fn diff_lines_with(options: &DiffOptions, base: &str, compare: &str) -> LineDiff {
    let text_diff = TextDiff::configure()
        .algorithm(options.algorithm.into())
        .diff_lines(base, compare);

    let mut segments: Vec<LineDiffSegment> = Vec::new();
    for change in text_diff.iter_all_changes() {
        let kind = LineKind::from(change.tag());
        match segments.last_mut() {
            Some(segment) if segment.kind == kind => segment.text.push_str(change.value()),
            _ => segments.push(LineDiffSegment {
                kind,
                text: change.value().to_string(),
            }),
        }
    }

    LineDiff { segments }
}

/// Serialize both definitions canonically and diff the resulting texts.
pub fn diff_definitions(
    options: &DiffOptions,
    base: &WorkflowDefinition,
    compare: &WorkflowDefinition,
) -> DiffResult<LineDiff> {
    let base_text = base.canonical_text()?;
    let compare_text = compare.canonical_text()?;
    Ok(diff_lines_with(options, &base_text, &compare_text))
}

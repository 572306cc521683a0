//! Diff engine for flowdiff.
//!
//! Compares two versions of a workflow graph and produces a structured diff
//! keyed by node and edge identity, plus a line-level diff of the canonical
//! text form with unified, split, and patch projections.
//!
//! # Key Types
//!
//! - [`WorkflowDiff`] / [`NodeDiff`] / [`EdgeDiff`] -- Identity-keyed graph diff
//! - [`PropertyChange`] -- Field-level change on a modified node
//! - [`DiffSummary`] -- Per-status counts
//! - [`LineDiff`] / [`LineDiffSegment`] -- Runs of added/removed/unchanged lines
//! - [`UnifiedLine`] / [`SplitRow`] / [`PatchDocument`] -- Projections of a line diff

pub mod equality;
pub mod error;
pub mod graph_diff;
pub mod line_diff;
pub mod patch;
pub mod property_diff;
pub mod summary;

pub use equality::{deep_equal, map_equal, optional_equal};
pub use error::{DiffError, DiffResult};
pub use graph_diff::{compute_workflow_diff, DiffStatus, EdgeDiff, NodeDiff, WorkflowDiff};
pub use line_diff::{
    diff_definitions, diff_lines, diff_lines_with, DiffOptions, LineAlgorithm, LineDiff,
    LineDiffSegment, LineKind,
};
pub use patch::{split_view, unified_view, PatchDocument, PatchLine, SplitCell, SplitRow, UnifiedLine};
pub use property_diff::{diff_properties, nodes_equal, ChangeType, PropertyChange};
pub use summary::{summarize, DiffSummary};

//! Terminal rendering of comparisons.
//!
//! Every renderer writes into any [`fmt::Write`] sink, so callers can print
//! through a `String` and tests can inspect the same text.

use std::fmt::{self, Write};

use colored::{ColoredString, Colorize};
use flowdiff_diff::{
    ChangeType, DiffStatus, DiffSummary, EdgeDiff, LineKind, NodeDiff, PropertyChange, SplitCell,
    SplitRow, UnifiedLine, WorkflowDiff,
};
use serde_json::Value;

/// Width of each half of the split view, excluding the line number.
const SPLIT_COLUMN_WIDTH: usize = 48;

fn status_label(status: DiffStatus) -> ColoredString {
    match status {
        DiffStatus::Added => "added".green(),
        DiffStatus::Removed => "removed".red(),
        DiffStatus::Modified => "modified".yellow(),
        DiffStatus::Unchanged => "unchanged".dimmed(),
    }
}

fn paint(kind: LineKind, text: &str) -> ColoredString {
    match kind {
        LineKind::Added => text.green(),
        LineKind::Removed => text.red(),
        LineKind::Unchanged => text.normal(),
    }
}

fn value_text(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_else(|| "-".to_string())
}

pub fn write_summary(
    out: &mut impl Write,
    base: &str,
    compare: &str,
    summary: &DiffSummary,
) -> fmt::Result {
    writeln!(out, "Comparing v{} → v{}", base.bold(), compare.bold())?;
    if !summary.has_changes() {
        return writeln!(out, "{}", "No structural changes.".dimmed());
    }
    writeln!(
        out,
        "  Nodes: {} added, {} removed, {} modified, {} unchanged",
        summary.nodes_added.to_string().green(),
        summary.nodes_removed.to_string().red(),
        summary.nodes_modified.to_string().yellow(),
        summary.nodes_unchanged,
    )?;
    writeln!(
        out,
        "  Edges: {} added, {} removed, {} modified, {} unchanged",
        summary.edges_added.to_string().green(),
        summary.edges_removed.to_string().red(),
        summary.edges_modified.to_string().yellow(),
        summary.edges_unchanged,
    )?;
    writeln!(out, "  Total changes: {}", summary.total_changes.to_string().bold())
}

fn write_property_change(out: &mut impl Write, change: &PropertyChange) -> fmt::Result {
    let base = value_text(change.base_value.as_ref());
    let compare = value_text(change.compare_value.as_ref());
    let line = match change.change_type {
        ChangeType::Added => format!("+ {}: {compare}", change.path).green(),
        ChangeType::Removed => format!("- {}: {base}", change.path).red(),
        ChangeType::Modified => format!("~ {}: {base} → {compare}", change.path).yellow(),
    };
    writeln!(out, "      {line}")
}

fn write_node(out: &mut impl Write, diff: &NodeDiff) -> fmt::Result {
    let node = diff.compare_node.as_ref().or(diff.base_node.as_ref());
    let kind = node.map(|n| n.kind.as_str()).unwrap_or_default();
    let label = node
        .and_then(|n| n.label())
        .map(|l| format!(" \"{l}\""))
        .unwrap_or_default();
    writeln!(
        out,
        "    {:<10} {} ({kind}){label}",
        status_label(diff.status),
        diff.node_id.cyan(),
    )?;
    for change in diff.property_changes.iter().flatten() {
        write_property_change(out, change)?;
    }
    Ok(())
}

fn write_edge(out: &mut impl Write, diff: &EdgeDiff) -> fmt::Result {
    let edge = diff.compare_edge.as_ref().or(diff.base_edge.as_ref());
    let route = edge
        .map(|e| format!(" {} → {}", e.source, e.target))
        .unwrap_or_default();
    writeln!(
        out,
        "    {:<10} {}{route}",
        status_label(diff.status),
        diff.edge_id.cyan(),
    )
}

/// Summary block followed by the changed nodes and edges. Unchanged entities
/// are listed only when `all` is set.
pub fn write_diff(out: &mut impl Write, diff: &WorkflowDiff, all: bool) -> fmt::Result {
    write_summary(out, &diff.base_version, &diff.compare_version, &diff.summary)?;

    let mut nodes = diff
        .node_diffs
        .iter()
        .filter(|d| all || d.status.is_change())
        .peekable();
    if nodes.peek().is_some() {
        writeln!(out, "\n  {}", "Nodes".bold())?;
        for node in nodes {
            write_node(out, node)?;
        }
    }

    let mut edges = diff
        .edge_diffs
        .iter()
        .filter(|d| all || d.status.is_change())
        .peekable();
    if edges.peek().is_some() {
        writeln!(out, "\n  {}", "Edges".bold())?;
        for edge in edges {
            write_edge(out, edge)?;
        }
    }

    if diff.settings_changed {
        writeln!(out, "\n  {}", "Settings changed".yellow())?;
    }
    if diff.variables_changed {
        writeln!(out, "\n  {}", "Variables changed".yellow())?;
    }
    Ok(())
}

pub fn write_unified(out: &mut impl Write, lines: &[UnifiedLine]) -> fmt::Result {
    for line in lines {
        writeln!(out, "{}", paint(line.kind, &line.to_string()))?;
    }
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn split_cell(cell: Option<&SplitCell>) -> String {
    match cell {
        Some(cell) => {
            let text = format!(
                "{:<width$}",
                truncate(&cell.text, SPLIT_COLUMN_WIDTH),
                width = SPLIT_COLUMN_WIDTH
            );
            format!("{:>4} {}", cell.number, paint(cell.kind, &text))
        }
        None => " ".repeat(SPLIT_COLUMN_WIDTH + 5),
    }
}

pub fn write_split(out: &mut impl Write, rows: &[SplitRow]) -> fmt::Result {
    for row in rows {
        writeln!(
            out,
            "{} │ {}",
            split_cell(row.left.as_ref()),
            split_cell(row.right.as_ref())
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdiff_diff::{compute_workflow_diff, diff_lines, split_view, unified_view};
    use flowdiff_types::{Edge, Node, WorkflowDefinition};
    use serde_json::json;

    fn render(f: impl FnOnce(&mut String) -> fmt::Result) -> String {
        let mut out = String::new();
        f(&mut out).unwrap();
        out
    }

    fn sample() -> WorkflowDiff {
        let base = WorkflowDefinition::new(
            vec![
                Node::new("n1", "trigger").with_data("label", json!("Start")),
                Node::new("n2", "action"),
            ],
            vec![Edge::new("e1", "n1", "n2")],
        );
        let compare = WorkflowDefinition::new(
            vec![
                Node::new("n1", "trigger").with_data("label", json!("Begin")),
                Node::new("n3", "action"),
            ],
            vec![],
        );
        compute_workflow_diff(&base, &compare, "1", "2")
    }

    #[test]
    fn diff_lists_changed_entities() {
        colored::control::set_override(false);
        let out = render(|out| write_diff(out, &sample(), false));

        assert!(out.contains("Comparing v1 → v2"));
        assert!(out.contains("Total changes: 4"));
        assert!(out.contains("modified   n1 (trigger) \"Begin\""));
        assert!(out.contains("~ data.label: \"Start\" → \"Begin\""));
        assert!(out.contains("removed    n2"));
        assert!(out.contains("added      n3"));
        assert!(out.contains("removed    e1 n1 → n2"));
    }

    #[test]
    fn identical_diff_says_so() {
        colored::control::set_override(false);
        let def = WorkflowDefinition::new(vec![Node::new("n1", "action")], vec![]);
        let diff = compute_workflow_diff(&def, &def, "1", "1");
        let out = render(|out| write_diff(out, &diff, false));

        assert!(out.contains("No structural changes."));
        assert!(!out.contains("Nodes"));
        assert!(render(|out| write_diff(out, &diff, true)).contains("unchanged"));
    }

    #[test]
    fn unified_has_markers() {
        colored::control::set_override(false);
        let lines = unified_view(&diff_lines("a\nb\n", "a\nc\n"));
        let out = render(|out| write_unified(out, &lines));

        assert!(out.contains("   1    1   a"));
        assert!(out.contains("   2      - b"));
        assert!(out.contains("        2 + c"));
    }

    #[test]
    fn split_truncates_long_lines() {
        colored::control::set_override(false);
        let long = "x".repeat(SPLIT_COLUMN_WIDTH + 10);
        let rows = split_view(&diff_lines(&format!("{long}\n"), ""));
        let out = render(|out| write_split(out, &rows));

        assert!(out.contains('…'));
        assert!(!out.contains(&long));
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}

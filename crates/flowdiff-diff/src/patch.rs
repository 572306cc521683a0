//! Projections of a line diff: unified view, split view, and patch export.
//!
//! All three are derived from the segments of a [`LineDiff`] and, for the
//! patch, the two version labels. None of them recompute the diff.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::line_diff::{LineDiff, LineKind};

/// One row of the unified view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedLine {
    /// Line number in the base text, absent for added lines.
    pub old_number: Option<usize>,
    /// Line number in the compare text, absent for removed lines.
    pub new_number: Option<usize>,
    pub kind: LineKind,
    pub text: String,
}

impl fmt::Display for UnifiedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4} {:>4} {} {}",
            number_or_blank(self.old_number),
            number_or_blank(self.new_number),
            self.kind.marker(),
            self.text
        )
    }
}

fn number_or_blank(number: Option<usize>) -> String {
    number.map(|n| n.to_string()).unwrap_or_default()
}

/// Build the unified view: one row per line with both line counters.
///
/// The old counter advances on removed and unchanged lines, the new counter
/// on added and unchanged lines.
pub fn unified_view(diff: &LineDiff) -> Vec<UnifiedLine> {
    let mut old_number = 0;
    let mut new_number = 0;

    diff.lines()
        .map(|(kind, text)| {
            let (old, new) = match kind {
                LineKind::Removed => {
                    old_number += 1;
                    (Some(old_number), None)
                }
                LineKind::Added => {
                    new_number += 1;
                    (None, Some(new_number))
                }
                LineKind::Unchanged => {
                    old_number += 1;
                    new_number += 1;
                    (Some(old_number), Some(new_number))
                }
            };
            UnifiedLine {
                old_number: old,
                new_number: new,
                kind,
                text: text.to_string(),
            }
        })
        .collect()
}

/// One side of a split-view row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitCell {
    pub number: usize,
    pub kind: LineKind,
    pub text: String,
}

/// One row of the split view. Unchanged lines fill both cells; added lines
/// only the right cell; removed lines only the left cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRow {
    pub left: Option<SplitCell>,
    pub right: Option<SplitCell>,
}

/// Build the split view: base on the left, compare on the right, each side
/// numbered independently.
pub fn split_view(diff: &LineDiff) -> Vec<SplitRow> {
    let mut left_number = 0;
    let mut right_number = 0;

    diff.lines()
        .map(|(kind, text)| {
            let left = matches!(kind, LineKind::Removed | LineKind::Unchanged).then(|| {
                left_number += 1;
                SplitCell {
                    number: left_number,
                    kind,
                    text: text.to_string(),
                }
            });
            let right = matches!(kind, LineKind::Added | LineKind::Unchanged).then(|| {
                right_number += 1;
                SplitCell {
                    number: right_number,
                    kind,
                    text: text.to_string(),
                }
            });

            SplitRow { left, right }
        })
        .collect()
}

/// A single body line of a patch document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchLine {
    pub kind: LineKind,
    pub text: String,
}

impl PatchLine {
    fn prefix(&self) -> &'static str {
        match self.kind {
            LineKind::Added => "+ ",
            LineKind::Removed => "- ",
            LineKind::Unchanged => "  ",
        }
    }
}

/// An exportable text document describing a line diff between two versions.
///
/// Rendered as:
///
/// ```text
/// --- workflow v<base>
/// +++ workflow v<compare>
///
/// <one prefixed line per diff line>
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchDocument {
    pub base_version: String,
    pub compare_version: String,
    pub lines: Vec<PatchLine>,
}

impl PatchDocument {
    /// Build a patch from a line diff and the two version labels.
    pub fn new(
        diff: &LineDiff,
        base_version: impl Into<String>,
        compare_version: impl Into<String>,
    ) -> Self {
        Self {
            base_version: base_version.into(),
            compare_version: compare_version.into(),
            lines: diff
                .lines()
                .map(|(kind, text)| PatchLine {
                    kind,
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    /// Suggested file name for download.
    pub fn file_name(&self) -> String {
        format!(
            "workflow-diff-v{}-v{}.patch",
            self.base_version, self.compare_version
        )
    }

    /// Render the document as text. Every line, including the last, ends
    /// with a newline.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PatchDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- workflow v{}", self.base_version)?;
        writeln!(f, "+++ workflow v{}", self.compare_version)?;
        writeln!(f)?;
        for line in &self.lines {
            writeln!(f, "{}{}", line.prefix(), line.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_diff::diff_lines;

    fn sample() -> LineDiff {
        diff_lines("a\nb\nc\n", "a\nB\nc\nd\n")
    }

    #[test]
    fn unified_numbers() {
        let rows = unified_view(&sample());
        let numbers: Vec<_> = rows
            .iter()
            .map(|r| (r.old_number, r.new_number, r.kind.marker()))
            .collect();
        assert_eq!(
            numbers,
            vec![
                (Some(1), Some(1), ' '),
                (Some(2), None, '-'),
                (None, Some(2), '+'),
                (Some(3), Some(3), ' '),
                (None, Some(4), '+'),
            ]
        );
        assert_eq!(rows[1].text, "b");
        assert_eq!(rows[2].text, "B");
    }

    #[test]
    fn unified_display_blanks_missing_numbers() {
        let rows = unified_view(&sample());
        assert_eq!(rows[0].to_string(), "   1    1   a");
        assert_eq!(rows[1].to_string(), "   2      - b");
        assert_eq!(rows[2].to_string(), "        2 + B");
    }

    #[test]
    fn split_rows() {
        let rows = split_view(&sample());
        assert_eq!(rows.len(), 5);

        let first = &rows[0];
        assert_eq!(first.left.as_ref().unwrap().number, 1);
        assert_eq!(first.right.as_ref().unwrap().number, 1);

        assert!(rows[1].right.is_none());
        assert_eq!(rows[1].left.as_ref().unwrap().text, "b");
        assert!(rows[2].left.is_none());
        assert_eq!(rows[2].right.as_ref().unwrap().text, "B");

        let third = &rows[3];
        assert_eq!(third.left.as_ref().unwrap().number, 3);
        assert_eq!(third.right.as_ref().unwrap().number, 3);

        assert!(rows[4].left.is_none());
        assert_eq!(rows[4].right.as_ref().unwrap().number, 4);
    }

    #[test]
    fn split_numbers_are_independent() {
        let rows = split_view(&diff_lines("x\ny\nz\nkeep\n", "keep\n"));
        let left: Vec<_> = rows.iter().filter_map(|r| r.left.as_ref()).map(|c| c.number).collect();
        let right: Vec<_> = rows.iter().filter_map(|r| r.right.as_ref()).map(|c| c.number).collect();
        assert_eq!(left, vec![1, 2, 3, 4]);
        assert_eq!(right, vec![1]);
    }

    #[test]
    fn patch_header_literal() {
        let patch = PatchDocument::new(&sample(), "3", "7");
        let text = patch.render();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("--- workflow v3"));
        assert_eq!(lines.next(), Some("+++ workflow v7"));
        assert_eq!(lines.next(), Some(""));
    }

    #[test]
    fn patch_body() {
        let patch = PatchDocument::new(&sample(), "1", "2");
        assert_eq!(
            patch.render(),
            "--- workflow v1\n+++ workflow v2\n\n  a\n- b\n+ B\n  c\n+ d\n"
        );
    }

    #[test]
    fn patch_of_identical_texts() {
        let patch = PatchDocument::new(&diff_lines("a\n", "a\n"), "1", "1");
        assert!(patch.lines.iter().all(|l| l.kind == LineKind::Unchanged));
        assert!(patch.render().ends_with("\n  a\n"));
    }

    #[test]
    fn patch_file_name() {
        let patch = PatchDocument::new(&LineDiff::default(), "4", "5");
        assert_eq!(patch.file_name(), "workflow-diff-v4-v5.patch");
        assert_eq!(patch.render(), "--- workflow v4\n+++ workflow v5\n\n");
    }
}

use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use flowdiff_diff::{PatchDocument, WorkflowDiff};
use flowdiff_history::Comparison;
use serde::Serialize;
use tracing::debug;

use crate::cli::*;
use crate::config::CliConfig;
use crate::input::load_pair;
use crate::render;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli { command, format, config, .. } = cli;
    let config = CliConfig::load(config.as_deref())?;
    if !config.color {
        colored::control::set_override(false);
    }
    debug!(?config, "loaded config");

    match command {
        Command::Compare(args) => cmd_compare(&config, format, args),
        Command::Patch(args) => cmd_patch(&config, args),
        Command::Summary(args) => cmd_summary(&config, format, args),
    }
}

fn load_comparison(config: &CliConfig, input: &InputArgs) -> anyhow::Result<Comparison> {
    let (base, compare) = load_pair(
        &input.base,
        &input.compare,
        &input.base_version,
        &input.compare_version,
    )?;
    let comparison = Comparison::from_definitions(
        &config.diff,
        &base.definition,
        &compare.definition,
        base.label,
        compare.label,
    )?;
    Ok(comparison)
}

/// JSON shape of `compare --format json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareReport<'a> {
    #[serde(flatten)]
    diff: &'a WorkflowDiff,
    additions: usize,
    deletions: usize,
}

fn cmd_compare(config: &CliConfig, format: OutputFormat, args: CompareArgs) -> anyhow::Result<()> {
    let comparison = load_comparison(config, &args.input)?;

    if format == OutputFormat::Json {
        let report = CompareReport {
            diff: &comparison.diff,
            additions: comparison.additions(),
            deletions: comparison.deletions(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut out = String::new();
    render::write_diff(&mut out, &comparison.diff, args.all)?;
    match args.view.unwrap_or(config.default_view) {
        ViewMode::Summary => {}
        ViewMode::Unified => {
            out.push('\n');
            render::write_unified(&mut out, &comparison.unified())?;
        }
        ViewMode::Split => {
            out.push('\n');
            render::write_split(&mut out, &comparison.split())?;
        }
    }
    print!("{out}");
    println!(
        "\n{} {}",
        format!("+{}", comparison.additions()).green(),
        format!("-{}", comparison.deletions()).red()
    );
    Ok(())
}

/// Write `patch` into `dir`, creating the directory if needed.
pub fn write_patch(dir: &Path, patch: &PatchDocument) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(patch.file_name());
    std::fs::write(&path, patch.render())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn cmd_patch(config: &CliConfig, args: PatchArgs) -> anyhow::Result<()> {
    let patch = load_comparison(config, &args.input)?.patch();
    if args.stdout {
        print!("{}", patch.render());
        return Ok(());
    }

    let dir = args.out.as_deref().unwrap_or(config.patch_dir.as_path());
    let path = write_patch(dir, &patch)?;
    println!("{} Wrote {}", "✓".green().bold(), path.display());
    Ok(())
}

fn cmd_summary(config: &CliConfig, format: OutputFormat, args: SummaryArgs) -> anyhow::Result<()> {
    let comparison = load_comparison(config, &args.input)?;
    let diff = &comparison.diff;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&diff.summary)?);
        }
        OutputFormat::Text => {
            let mut out = String::new();
            render::write_summary(&mut out, &diff.base_version, &diff.compare_version, &diff.summary)?;
            print!("{out}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdiff_types::{Node, WorkflowDefinition};
    use serde_json::json;

    fn write_def(dir: &Path, name: &str, label: &str) -> PathBuf {
        let def = WorkflowDefinition::new(
            vec![Node::new("n1", "action").with_data("label", json!(label))],
            vec![],
        );
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(&def).unwrap()).unwrap();
        path
    }

    fn input(dir: &Path) -> InputArgs {
        InputArgs {
            base: write_def(dir, "base.json", "Start"),
            compare: write_def(dir, "compare.json", "Begin"),
            base_version: "3".into(),
            compare_version: "4".into(),
        }
    }

    #[test]
    fn comparison_uses_version_labels() {
        let dir = tempfile::tempdir().unwrap();
        let comparison = load_comparison(&CliConfig::default(), &input(dir.path())).unwrap();

        assert_eq!(comparison.diff.base_version, "3");
        assert_eq!(comparison.diff.summary.nodes_modified, 1);
        assert_eq!(comparison.additions(), 1);
        assert_eq!(comparison.deletions(), 1);
    }

    #[test]
    fn write_patch_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let patch = load_comparison(&CliConfig::default(), &input(dir.path()))
            .unwrap()
            .patch();

        let out = dir.path().join("nested/patches");
        let path = write_patch(&out, &patch).unwrap();

        assert_eq!(path, out.join("workflow-diff-v3-v4.patch"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("--- workflow v3\n+++ workflow v4\n"));
        assert!(written.contains("- ") && written.contains("+ "));
    }

    #[test]
    fn compare_report_flattens_diff() {
        let dir = tempfile::tempdir().unwrap();
        let comparison = load_comparison(&CliConfig::default(), &input(dir.path())).unwrap();
        let report = CompareReport {
            diff: &comparison.diff,
            additions: comparison.additions(),
            deletions: comparison.deletions(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["baseVersion"], "3");
        assert_eq!(value["summary"]["nodesModified"], 1);
        assert_eq!(value["additions"], 1);
    }

    #[test]
    fn missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = input(dir.path());
        args.compare = dir.path().join("absent.json");

        assert!(load_comparison(&CliConfig::default(), &args).is_err());
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(
    name = "flowdiff",
    about = "Compare workflow versions and export patches",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Path to a TOML config file (defaults to ./flowdiff.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Structural summary and per-entity changes only
    #[default]
    Summary,
    /// Structural diff followed by the unified line view
    Unified,
    /// Structural diff followed by the side-by-side line view
    Split,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the structural and textual diff between two versions
    Compare(CompareArgs),
    /// Export the line diff as a patch document
    Patch(PatchArgs),
    /// Show only the change counts
    Summary(SummaryArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Base version file (version record or bare definition, JSON)
    pub base: PathBuf,
    /// Compare version file (version record or bare definition, JSON)
    pub compare: PathBuf,
    /// Label for a bare base definition
    #[arg(long, default_value = "1")]
    pub base_version: String,
    /// Label for a bare compare definition
    #[arg(long, default_value = "2")]
    pub compare_version: String,
}

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[arg(long)]
    pub view: Option<ViewMode>,
    /// Also list unchanged nodes and edges
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct PatchArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Directory to write the patch file into
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Print the patch instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

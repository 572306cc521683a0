use std::path::{Path, PathBuf};

use anyhow::Context;
use flowdiff_diff::DiffOptions;
use serde::{Deserialize, Serialize};

use crate::cli::ViewMode;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "flowdiff.toml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// View used by `compare` when `--view` is not given.
    pub default_view: ViewMode,
    /// Directory `patch` writes into when `--out` is not given.
    pub patch_dir: PathBuf,
    pub color: bool,
    pub diff: DiffOptions,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_view: ViewMode::Summary,
            patch_dir: PathBuf::from("."),
            color: true,
            diff: DiffOptions::default(),
        }
    }
}

impl CliConfig {
    /// Load from an explicit path, else from `./flowdiff.toml` if it
    /// exists, else defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdiff_diff::LineAlgorithm;

    #[test]
    fn default_config() {
        let c = CliConfig::default();
        assert_eq!(c.default_view, ViewMode::Summary);
        assert_eq!(c.patch_dir, PathBuf::from("."));
        assert!(c.color);
        assert_eq!(c.diff.algorithm, LineAlgorithm::Myers);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn full_toml() {
        let c = CliConfig::from_toml(
            r#"
            default_view = "unified"
            patch_dir = "patches"
            color = false

            [diff]
            algorithm = "patience"
            "#,
        )
        .unwrap();
        assert_eq!(c.default_view, ViewMode::Unified);
        assert_eq!(c.patch_dir, PathBuf::from("patches"));
        assert!(!c.color);
        assert_eq!(c.diff.algorithm, LineAlgorithm::Patience);
    }

    #[test]
    fn unknown_view_rejected() {
        assert!(CliConfig::from_toml(r#"default_view = "sideways""#).is_err());
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flowdiff.toml");
        std::fs::write(&path, "default_view = \"split\"\n").unwrap();

        let c = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(c.default_view, ViewMode::Split);
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}

//! Tool configuration stored in `aquirun.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::table::DateColumns;
use crate::io::directive::DEFAULT_SUMMARY_LABELS;
use crate::io::output::DEFAULT_OUTPUT_SUFFIX;
use crate::io::process::CallingConvention;
use crate::io::scenario::DEFAULT_INPUT_FILE;

/// Tool configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to the conventions of the stock model
/// distribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AquirunConfig {
    /// Path to the model executable. Optional so that editing and loading
    /// work without one; `run` requires it here or on the command line.
    pub exe_path: Option<PathBuf>,

    /// Whether the scenario directory is also passed as argv[1].
    pub calling_convention: CallingConvention,

    /// Name of the configuration file at the scenario root.
    pub input_file_name: String,

    /// Suffix selecting result files in `Output/`.
    pub output_suffix: String,

    /// Column names the date is reconstructed from.
    pub date_columns: DateColumns,

    /// Labels reported by `aquirun summary` when none are given.
    pub summary_labels: Vec<String>,
}

impl Default for AquirunConfig {
    fn default() -> Self {
        Self {
            exe_path: None,
            calling_convention: CallingConvention::default(),
            input_file_name: DEFAULT_INPUT_FILE.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            date_columns: DateColumns::default(),
            summary_labels: DEFAULT_SUMMARY_LABELS
                .iter()
                .map(|label| (*label).to_string())
                .collect(),
        }
    }
}

impl AquirunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.input_file_name.trim().is_empty() {
            return Err(anyhow!("input_file_name must be non-empty"));
        }
        if self.output_suffix.trim().is_empty() {
            return Err(anyhow!("output_suffix must be non-empty"));
        }
        let components = [
            &self.date_columns.year,
            &self.date_columns.month,
            &self.date_columns.day,
        ];
        if components.iter().any(|name| name.trim().is_empty()) {
            return Err(anyhow!("date_columns names must be non-empty"));
        }
        if components[0] == components[1]
            || components[0] == components[2]
            || components[1] == components[2]
        {
            return Err(anyhow!("date_columns names must be distinct"));
        }
        if self.summary_labels.is_empty() {
            return Err(anyhow!("summary_labels must be a non-empty list"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AquirunConfig::default()`.
pub fn load_config(path: &Path) -> Result<AquirunConfig> {
    if !path.exists() {
        let cfg = AquirunConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AquirunConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &AquirunConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, AquirunConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("aquirun.toml");
        let cfg = AquirunConfig {
            exe_path: Some(PathBuf::from("/opt/aquimod2/AquiMod2")),
            calling_convention: CallingConvention::WorkdirOnly,
            ..AquirunConfig::default()
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn duplicate_date_column_names_are_rejected() {
        let cfg = AquirunConfig {
            date_columns: DateColumns {
                month: "Year".to_string(),
                ..DateColumns::default()
            },
            ..AquirunConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}

//! Directive editing over configuration files on disk.
//!
//! `replace_value` rewrites the whole file in place. The model reads
//! `Input.txt` by position, so the file keeps its exact layout; the rewrite
//! is not atomic and a failure mid-write can leave the file partially
//! written. Callers wanting stronger guarantees should keep the scenario
//! under version control.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::core::directive;
use crate::error::{AquirunError, Result};

/// Label whose value line carries the model's output-writing toggles.
pub const OUTPUT_FLAGS_LABEL: &str = "Write model output files";

/// Labels reported by default in a configuration summary.
pub const DEFAULT_SUMMARY_LABELS: [&str; 7] = [
    "Simulation mode",
    "Monte Carlo parameters",
    "SCE-UA parameters",
    "Evaluation parameters",
    "Objective function and parameters",
    "Spin-up period",
    "Write model output files",
];

/// Return the value line following `label` in the file at `path`.
pub fn lookup_value(path: &Path, label: &str) -> Result<String> {
    let contents = read_config(path)?;
    directive::lookup(&contents, label)
}

/// Replace the value line following `label` and rewrite the file.
pub fn replace_value(path: &Path, label: &str, value: &str) -> Result<()> {
    let contents = read_config(path)?;
    let updated = directive::replace(&contents, label, value)?;
    fs::write(path, updated).map_err(|err| AquirunError::io(path, err))?;
    debug!(path = %path.display(), label, value, "directive updated");
    Ok(())
}

/// Set the "Write model output files" flags.
///
/// `flags` is the raw token string the model expects (for example `"N Y Y"`);
/// its internal structure is the caller's responsibility.
pub fn apply_output_flags(path: &Path, flags: &str) -> Result<()> {
    replace_value(path, OUTPUT_FLAGS_LABEL, flags)
}

/// One label's entry in a configuration summary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummaryEntry {
    pub label: String,
    /// `None` when the label was not found or the file was unreadable.
    pub value: Option<String>,
}

/// Best-effort report of directive values.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigSummary {
    pub entries: Vec<SummaryEntry>,
}

impl ConfigSummary {
    /// Render as one `label: value` line per entry, with an explicit marker
    /// for labels that were not found.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.label);
            out.push_str(": ");
            out.push_str(entry.value.as_deref().unwrap_or("(not found)"));
            out.push('\n');
        }
        out
    }
}

/// Look up each label in order, recording a placeholder for any that fails.
///
/// Never fails as a whole: partial configuration visibility is more useful
/// than none.
pub fn summarize<S: AsRef<str>>(path: &Path, labels: &[S]) -> ConfigSummary {
    let entries = labels
        .iter()
        .map(|label| SummaryEntry {
            label: label.as_ref().to_string(),
            value: lookup_value(path, label.as_ref()).ok(),
        })
        .collect();
    ConfigSummary { entries }
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            AquirunError::FileNotFound(path.to_path_buf())
        } else {
            AquirunError::io(path, err)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_input;

    const SAMPLE: &str = "Write model output files\nN N N\nSimulation mode\n1\n";

    #[test]
    fn replace_then_lookup_round_trips_on_disk() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_input(temp.path(), SAMPLE);

        replace_value(&path, OUTPUT_FLAGS_LABEL, "N Y Y").expect("replace");
        assert_eq!(
            lookup_value(&path, OUTPUT_FLAGS_LABEL).expect("lookup"),
            "N Y Y"
        );
        assert_eq!(lookup_value(&path, "Simulation mode").expect("lookup"), "1");
    }

    #[test]
    fn apply_output_flags_targets_fixed_label() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_input(temp.path(), SAMPLE);

        apply_output_flags(&path, "Y Y Y").expect("flags");
        assert_eq!(
            lookup_value(&path, OUTPUT_FLAGS_LABEL).expect("lookup"),
            "Y Y Y"
        );
    }

    #[test]
    fn lookup_missing_file_fails_with_file_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("Input.txt");
        let err = lookup_value(&missing, "Simulation mode").unwrap_err();
        assert!(matches!(err, AquirunError::FileNotFound(path) if path == missing));
    }

    #[test]
    fn replace_missing_label_leaves_file_unchanged() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_input(temp.path(), SAMPLE);

        let err = replace_value(&path, "Spin-up period", "12").unwrap_err();
        assert!(matches!(err, AquirunError::DirectiveNotFound(_)));
        assert_eq!(std::fs::read_to_string(&path).expect("read"), SAMPLE);
    }

    #[test]
    fn summarize_records_placeholders_instead_of_failing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_input(temp.path(), SAMPLE);

        let summary = summarize(&path, &["Simulation mode", "Spin-up period"]);
        assert_eq!(
            summary.entries,
            vec![
                SummaryEntry {
                    label: "Simulation mode".to_string(),
                    value: Some("1".to_string()),
                },
                SummaryEntry {
                    label: "Spin-up period".to_string(),
                    value: None,
                },
            ]
        );
        let rendered = summary.render();
        assert!(rendered.contains("Simulation mode: 1"));
        assert!(rendered.contains("Spin-up period: (not found)"));
    }

    #[test]
    fn summarize_missing_file_reports_every_label_unfound() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("Input.txt");
        let summary = summarize(&missing, &DEFAULT_SUMMARY_LABELS);
        assert_eq!(summary.entries.len(), DEFAULT_SUMMARY_LABELS.len());
        assert!(summary.entries.iter().all(|entry| entry.value.is_none()));
    }
}

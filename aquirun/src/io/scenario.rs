//! Scenario directory handle.
//!
//! A scenario is a directory holding the model's configuration file
//! (conventionally `Input.txt`) at its root and an `Output/` subdirectory the
//! model writes result files into. The handle is an explicit resource passed
//! to each operation, never ambient state.

use std::path::{Path, PathBuf};

use crate::error::{AquirunError, Result};

pub const DEFAULT_INPUT_FILE: &str = "Input.txt";
pub const OUTPUT_DIR: &str = "Output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    root: PathBuf,
    input_file_name: String,
}

impl Scenario {
    /// Open a scenario rooted at `root`.
    ///
    /// Fails with [`AquirunError::DirectoryNotFound`] when the directory does
    /// not exist.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AquirunError::DirectoryNotFound(root));
        }
        Ok(Self {
            root,
            input_file_name: DEFAULT_INPUT_FILE.to_string(),
        })
    }

    /// Use a configuration file name other than `Input.txt`.
    pub fn with_input_file(mut self, name: impl Into<String>) -> Self {
        self.input_file_name = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn input_path(&self) -> PathBuf {
        self.root.join(&self.input_file_name)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_directory_fails() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("no-such-scenario");
        let err = Scenario::open(&missing).unwrap_err();
        assert!(matches!(err, AquirunError::DirectoryNotFound(path) if path == missing));
    }

    #[test]
    fn paths_follow_layout_convention() {
        let temp = tempfile::tempdir().expect("tempdir");
        let scenario = Scenario::open(temp.path()).expect("open");
        assert_eq!(scenario.input_path(), temp.path().join("Input.txt"));
        assert_eq!(scenario.output_dir(), temp.path().join("Output"));
    }

    #[test]
    fn input_file_name_is_configurable() {
        let temp = tempfile::tempdir().expect("tempdir");
        let scenario = Scenario::open(temp.path())
            .expect("open")
            .with_input_file("Config.txt");
        assert_eq!(scenario.input_path(), temp.path().join("Config.txt"));
    }
}

//! Test-only helpers for building scenario directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::io::scenario::OUTPUT_DIR;

/// Write an `Input.txt` at the scenario root and return its path.
pub fn write_input(root: &Path, contents: &str) -> PathBuf {
    let path = root.join("Input.txt");
    fs::write(&path, contents).expect("write Input.txt");
    path
}

/// Write a result file under `Output/`, creating the directory, and return
/// its path.
pub fn write_output(root: &Path, name: &str, contents: &str) -> PathBuf {
    let dir = root.join(OUTPUT_DIR);
    fs::create_dir_all(&dir).expect("create Output dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write result file");
    path
}

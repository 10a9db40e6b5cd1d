//! Typed failures for scenario orchestration.
//!
//! Precondition failures (missing executable, directory, file, or directive
//! label) surface immediately as dedicated variants so callers and tests can
//! match on them. Only [`crate::io::directive::summarize`] downgrades
//! per-label failures into placeholders.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AquirunError>;

#[derive(Debug, Error)]
pub enum AquirunError {
    /// Model executable path does not name an existing regular file.
    #[error("executable not found: {0}")]
    ExecutableNotFound(PathBuf),

    /// Scenario or working directory does not exist.
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Configuration or result file does not exist.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// No line in the configuration file matches the label, or the label is
    /// the last line and has no value line after it.
    #[error("directive not found: {0:?}")]
    DirectiveNotFound(String),

    /// A result-file row could not be parsed (wrong field count or a
    /// non-numeric value in a numeric column). `line` is 1-based.
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// Year/month/day fields do not form a valid calendar date.
    #[error("invalid date at line {line}: year={year} month={month} day={day}")]
    InvalidDate {
        line: usize,
        year: i64,
        month: i64,
        day: i64,
    },

    /// Underlying I/O failure with the path it occurred on.
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AquirunError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

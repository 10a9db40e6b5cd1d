//! Model invocation with full stdout/stderr capture.
//!
//! The model is a long-running opaque binary. There is no timeout and no
//! retry: the call blocks until the process terminates, and a non-zero exit
//! is returned as data for the caller to act on, since some failures are
//! expected during iterative tuning.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::error::{AquirunError, Result};

/// How the scenario directory is handed to the model.
///
/// Observed model revisions differ: some expect the directory as an explicit
/// command-line argument, others rely solely on the working directory. The
/// choice is an explicit configuration option rather than a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallingConvention {
    /// Pass the working directory as argv[1] in addition to using it as the
    /// current directory.
    #[default]
    DirArg,
    /// Rely on the working directory alone.
    WorkdirOnly,
}

/// Captured outcome of one model invocation. Immutable, not persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunResult {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    /// Exit code 0 means success; anything else is a failure.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run the model executable against `workdir` and capture its outcome.
///
/// Preconditions are checked before anything is spawned: `exe` must be an
/// existing regular file and `workdir` an existing directory. Output is
/// drained on separate threads while the child runs so neither pipe can fill
/// up and deadlock the process.
#[instrument(skip_all, fields(exe = %exe.display(), workdir = %workdir.display(), ?convention))]
pub fn run_model(exe: &Path, workdir: &Path, convention: CallingConvention) -> Result<RunResult> {
    if !exe.is_file() {
        return Err(AquirunError::ExecutableNotFound(exe.to_path_buf()));
    }
    if !workdir.is_dir() {
        return Err(AquirunError::DirectoryNotFound(workdir.to_path_buf()));
    }

    let mut cmd = Command::new(exe);
    if convention == CallingConvention::DirArg {
        cmd.arg(workdir);
    }
    cmd.current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!("spawning model process");
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            error!(err = %err, "failed to spawn model");
            return Err(AquirunError::io(exe, err));
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| AquirunError::io(exe, std::io::Error::other("stdout was not piped")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| AquirunError::io(exe, std::io::Error::other("stderr was not piped")))?;

    let stdout_handle = thread::spawn(move || drain(stdout));
    let stderr_handle = thread::spawn(move || drain(stderr));

    let status = child.wait().map_err(|err| AquirunError::io(exe, err))?;
    let stdout = join_output(stdout_handle).map_err(|err| AquirunError::io(exe, err))?;
    let stderr = join_output(stderr_handle).map_err(|err| AquirunError::io(exe, err))?;

    debug!(exit_code = ?status.code(), "model finished");
    Ok(RunResult {
        exit_code: status.code(),
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

fn drain<R: Read>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

fn join_output(handle: thread::JoinHandle<std::io::Result<Vec<u8>>>) -> std::io::Result<Vec<u8>> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(std::io::Error::other("output reader thread panicked")),
    }
}

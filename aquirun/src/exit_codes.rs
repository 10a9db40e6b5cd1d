//! Stable exit codes for aquirun CLI commands.

/// Command succeeded; for `run`, the model exited 0.
pub const OK: i32 = 0;
/// Invalid paths, config, directives, or result files, or other errors.
pub const INVALID: i32 = 1;
/// `aquirun run` completed but the model exited non-zero.
pub const MODEL_FAILED: i32 = 2;

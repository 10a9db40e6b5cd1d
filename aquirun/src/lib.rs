//! Orchestration for AquiMod2 groundwater-model runs.
//!
//! This crate edits the model's text-based configuration (`Input.txt`),
//! invokes the model executable against a scenario directory, and loads the
//! whitespace-delimited result files it writes into `Output/`. The
//! architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (directive scan/replace, table
//!   parsing and typing, date derivation). No I/O, fully testable in
//!   isolation.
//! - **[`io`]**: Side-effecting operations (filesystem, process execution).
//!
//! Plotting and interactive selection are external collaborators: this crate
//! hands them typed tables, plottable column names, and result-file lists.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

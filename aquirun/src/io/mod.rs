//! Side-effecting operations: filesystem access and model invocation.

pub mod config;
pub mod directive;
pub mod output;
pub mod process;
pub mod scenario;

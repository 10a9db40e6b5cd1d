//! Pure logic: directive scanning and tabular parsing. No I/O.

pub mod directive;
pub mod table;

//! Validation of a parsed [`crate::ast::Program`]: declarations, name resolution and typing.
mod analyzer;
mod bin_op_checker;
mod error;
mod symbol_table;

pub use analyzer::analyze;
pub use error::*;
pub use symbol_table::*;

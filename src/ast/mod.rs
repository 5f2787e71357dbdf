//! Abstract Syntax Tree definitions
mod nodes;
mod type_spec;

pub use nodes::*;
pub use type_spec::*;

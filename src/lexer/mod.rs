//! Functionality for converting a source code string into a [`tokens::Token`] stream.
mod char_ext;
mod char_lexer;
mod error;
mod lexer;

pub mod tokens;

pub use error::*;
pub use lexer::*;

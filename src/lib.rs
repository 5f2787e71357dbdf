//! A compiler for a small imperative language with brainrot keywords.
//!
//! Source text flows through [`lexer`], [`parser`], [`semantic`] analysis and
//! [`il`] generation, producing a three-address code listing. The listing can
//! be executed by the [`interpreter`] or translated to assembly by [`codegen`].
pub mod ast;
pub mod codegen;
pub mod diagnostics;
pub mod error;
pub mod il;
pub mod interpreter;
pub mod lexer;
pub mod listing;
pub mod location;
pub mod parser;
pub mod semantic;

mod prelude;
mod source_map;

use prelude::*;

pub use error::{Category, CompileError, PositionalError};
pub use il::TacListing;

/// Options controlling a single compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Run constant folding and dead-code elimination on the generated code.
    pub optimise: bool,
}
impl Default for CompileOptions {
    fn default() -> Self {
        Self { optimise: true }
    }
}

/// Runs the front end: lexing, parsing and semantic analysis.
/// Returns the validated program.
pub fn check(source: &str) -> Result<ast::Program, CompileError> {
    let tokens = lexer::lex(source)?;
    let program = parser::parse(&tokens)?;
    semantic::analyze(&program)?;
    Ok(program)
}

/// Compiles source text to a three-address code listing.
///
/// Compilation stops at the first error. Separate calls share no state.
pub fn compile(source: &str, options: &CompileOptions) -> Result<TacListing, CompileError> {
    debug!("Compiling {} bytes of source with {:?}", source.len(), options);
    let program = check(source)?;
    let listing = il::generate(program);

    Ok(if options.optimise {
        il::optimise(listing)
    } else {
        listing
    })
}

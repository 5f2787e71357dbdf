//! Errors that can be produced by the compilation pipeline.
use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::{
    lexer::LexError, location::Location, parser::ParseError, semantic::SemanticError,
};

pub trait PositionalError {
    fn location(&self) -> Location;
    fn describe(&self) -> String;
}

/// The category under which an error is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Lexical,
    Syntax,
    Semantic,
}
impl Display for Category {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Category::Lexical => "Lexical",
            Category::Syntax => "Syntax",
            Category::Semantic => "Semantic",
        })
    }
}

/// The single error produced by a failed compilation.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lexical(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    /// A defect in the compiler itself, rather than in the program being compiled.
    #[error("Internal compiler error: {0}")]
    Internal(#[from] anyhow::Error),
}
impl CompileError {
    /// Internal errors are reported as semantic errors.
    pub fn category(&self) -> Category {
        match self {
            CompileError::Lexical(_) => Category::Lexical,
            CompileError::Syntax(_) => Category::Syntax,
            CompileError::Semantic(_) | CompileError::Internal(_) => Category::Semantic,
        }
    }
}
impl PositionalError for CompileError {
    fn location(&self) -> Location {
        match self {
            CompileError::Lexical(err) => err.location(),
            CompileError::Syntax(err) => err.location(),
            CompileError::Semantic(err) => err.location(),
            CompileError::Internal(_) => Location::unknown(),
        }
    }

    fn describe(&self) -> String {
        match self {
            CompileError::Lexical(err) => err.describe(),
            CompileError::Syntax(err) => err.describe(),
            CompileError::Semantic(err) => err.describe(),
            CompileError::Internal(_) => self.to_string(),
        }
    }
}

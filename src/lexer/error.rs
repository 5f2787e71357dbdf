//! Errors produced while lexing.
use thiserror::Error;

use crate::{error::PositionalError, location::Location};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ErrorType {
    #[error("Invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("Invalid number format: multiple decimal points")]
    MultipleDecimalPoints,
    #[error("Invalid integer literal: {0}")]
    IntegerLiteral(String),
}

/// A lexical error. Lexing stops at the first one encountered.
#[derive(Debug, Error)]
#[error("{error_type}")]
pub struct LexError {
    pub location: Location,
    pub error_type: ErrorType,
}

impl LexError {
    pub fn new(location: Location, error_type: ErrorType) -> Self {
        Self {
            location,
            error_type,
        }
    }
}

impl PositionalError for LexError {
    fn location(&self) -> Location {
        self.location
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

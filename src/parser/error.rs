//! Error handling for parsing.
use std::fmt;

use thiserror::Error;

use crate::{
    error::PositionalError,
    lexer::tokens::{Token, TokenKind},
    location::Location,
};

/// A parsing error, indicating both the parsing stage in which the error was encoutered
/// and the cause for the error.
#[derive(Debug, Error)]
#[error("{reason} when parsing {stage}")]
pub struct ParseError {
    stage: Stage,
    reason: Reason,
}

impl ParseError {
    pub fn new(stage: Stage, reason: Reason) -> Self {
        Self { stage, reason }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn reason(&self) -> &Reason {
        &self.reason
    }
}

impl PositionalError for ParseError {
    fn location(&self) -> Location {
        self.reason.token().location
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Error)]
pub enum Reason {
    #[error("expected {0}, found {1}")]
    Expected(TokenKind, Token),
    #[error("expected a type name, found {0}")]
    ExpectedType(Token),
    #[error("unexpected {0}")]
    UnexpectedToken(Token),
    #[error("nesting too deep at {0}")]
    TooDeeplyNested(Token),
}
impl Reason {
    /// The token at which parsing failed.
    pub fn token(&self) -> &Token {
        match self {
            Reason::Expected(_, token) => token,
            Reason::ExpectedType(token) => token,
            Reason::UnexpectedToken(token) => token,
            Reason::TooDeeplyNested(token) => token,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// A variable declaration
    VarDecl,
    /// A statement
    Statement,
    /// An assignment statement
    Assign,
    /// An if-statement, including its elif and else branches
    If,
    /// A while-loop
    While,
    /// A print statement
    Print,
    /// A block of statements between braces
    Block,
    /// The start of an expression.
    Expr,
    /// The end of a parenthesised expression.
    ParenExprEnd,
}
impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Stage::VarDecl => "a variable declaration",
            Stage::Statement => "a statement",
            Stage::Assign => "an assignment",
            Stage::If => "an if-statement",
            Stage::While => "a while-loop",
            Stage::Print => "a print statement",
            Stage::Block => "a block",
            Stage::Expr => "an expression",
            Stage::ParenExprEnd => "the end of a parenthesised expression",
        })
    }
}

pub trait AddStage {
    type Annotated;

    fn add_stage(self, stage: Stage) -> Self::Annotated;
}

impl<O> AddStage for Result<O, Reason> {
    type Annotated = Result<O, ParseError>;

    fn add_stage(self, stage: Stage) -> Self::Annotated {
        self.map_err(|reason| ParseError { stage, reason })
    }
}

pub fn failure<R>(stage: Stage, reason: Reason) -> Result<R, ParseError> {
    Err(ParseError::new(stage, reason))
}

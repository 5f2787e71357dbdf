use thiserror::Error;

use crate::{
    ast::{BinOp, TypeSpec, UnOp},
    error::PositionalError,
    location::Location,
};

/// Construct a new error result.
pub fn error<S>(kind: SemanticErrorKind, location: Location) -> Result<S, SemanticError> {
    Err(SemanticError::new(kind, location))
}

/// An error as produced by the semantic analyzer.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct SemanticError {
    kind: SemanticErrorKind,
    location: Location,
}
impl SemanticError {
    pub fn new(kind: SemanticErrorKind, location: Location) -> Self {
        Self { kind, location }
    }
    pub fn kind(&self) -> &SemanticErrorKind {
        &self.kind
    }
}
impl PositionalError for SemanticError {
    fn location(&self) -> Location {
        self.location
    }

    fn describe(&self) -> String {
        self.kind.to_string()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemanticErrorKind {
    #[error("variable '{name}' is already declared at {original}")]
    DuplicateDeclaration { name: String, original: Location },
    #[error("undeclared variable '{0}'")]
    UndeclaredVariable(String),
    #[error("type mismatch: cannot assign expression of type '{actual}' to variable '{name}' of type '{expected}'")]
    AssignMismatch {
        name: String,
        expected: TypeSpec,
        actual: TypeSpec,
    },
    #[error("type mismatch: cannot apply operator '{0}' to operands of type '{1}' and '{2}'")]
    OperandMismatch(BinOp, TypeSpec, TypeSpec),
    #[error("cannot apply operator '{0}' to an operand of type '{1}'")]
    UnaryOperand(UnOp, TypeSpec),
    #[error("condition must be of type 'boolean', found '{0}'")]
    NonBooleanCondition(TypeSpec),
}

pub trait AddLocation {
    type Annotated;

    fn add_location(self, location: Location) -> Self::Annotated;
}

impl<O> AddLocation for Result<O, SemanticErrorKind> {
    type Annotated = Result<O, SemanticError>;

    fn add_location(self, location: Location) -> Self::Annotated {
        self.map_err(|kind| SemanticError::new(kind, location))
    }
}

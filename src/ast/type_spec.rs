//! Type specifications.
use std::fmt::{self, Display, Formatter};

use crate::lexer::tokens::Keyword;

/// The type of a variable or expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSpec {
    Integer,
    Float,
    /// The result of a comparison. Not nameable in source code.
    Boolean,
}
impl TypeSpec {
    /// Determines the type named by a type keyword.
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Integer => Some(TypeSpec::Integer),
            Keyword::Float => Some(TypeSpec::Float),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeSpec::Integer | TypeSpec::Float)
    }
}
impl Display for TypeSpec {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TypeSpec::Integer => write!(f, "{}", Keyword::Integer),
            TypeSpec::Float => write!(f, "{}", Keyword::Float),
            TypeSpec::Boolean => f.write_str("boolean"),
        }
    }
}

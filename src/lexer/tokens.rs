//! Tokens, as produced by the lexer.
use std::fmt::{self, Display};

use crate::location::Location;

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The source text this token was read from, as written.
    pub lexeme: String,
    pub location: Location,
}
impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, lexeme: S, location: Location) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    /// The length of the lexeme, in characters.
    pub fn length(&self) -> usize {
        self.lexeme.chars().count()
    }
}
impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier(String),
    Symbol(Symbol),
    Literal(Literal),
    /// Always the last token in a stream, and never anywhere else.
    Eof,
}
impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Keyword(kw) => write!(f, "'{}'", kw),
            TokenKind::Identifier(_) => f.write_str("an identifier"),
            TokenKind::Symbol(sym) => write!(f, "'{}'", sym),
            TokenKind::Literal(_) => f.write_str("a number"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A reserved keyword. Keywords are matched case-insensitively.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Keyword {
    /// Reserved, but not used by any production.
    Program,
    Var,
    Integer,
    Float,
    If,
    Else,
    While,
    Print,
}
impl Keyword {
    /// Looks up a keyword by its spelling, ignoring case.
    pub fn lookup(word: &str) -> Option<Self> {
        Some(match word.to_ascii_lowercase().as_str() {
            "brainrot" => Keyword::Program,
            "tongtongsahur" => Keyword::Var,
            "bombardino" => Keyword::Integer,
            "crocodilo" => Keyword::Float,
            "chimpanzini" => Keyword::If,
            "bananini" => Keyword::Else,
            "patapim" => Keyword::While,
            "drip" => Keyword::Print,
            _ => return None,
        })
    }
}
impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Keyword::Program => "brainrot",
            Keyword::Var => "tongtongsahur",
            Keyword::Integer => "bombardino",
            Keyword::Float => "crocodilo",
            Keyword::If => "chimpanzini",
            Keyword::Else => "bananini",
            Keyword::While => "patapim",
            Keyword::Print => "drip",
        })
    }
}

/// A symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Assign,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Semicolon,
}
impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Asterisk => "*",
            Symbol::Slash => "/",
            Symbol::Assign => "=",
            Symbol::Eq => "==",
            Symbol::Neq => "!=",
            Symbol::Lt => "<",
            Symbol::Gt => ">",
            Symbol::Lte => "<=",
            Symbol::Gte => ">=",
            Symbol::OpenParen => "(",
            Symbol::CloseParen => ")",
            Symbol::OpenBrace => "{",
            Symbol::CloseBrace => "}",
            Symbol::Semicolon => ";",
        })
    }
}

/// A numeric literal. Whether it is an integer or a float is decided by the
/// presence of a decimal point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
}

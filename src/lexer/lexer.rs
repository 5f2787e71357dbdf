//! Lexing functions for constructing a token stream.
use std::num::ParseIntError;

use crate::{location::Location, prelude::*};

use super::{char_ext::*, char_lexer::*, error::*, tokens::*};

type LexResult<T> = Option<Result<T, LexError>>;

struct Lexer<'s> {
    lexer: CharLexer<'s>,
    tokens: Vec<Token>,
}

/// Converts a source string into a token stream, terminated by a single
/// [`TokenKind::Eof`] token. Stops at the first lexical error.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

impl<'s> Lexer<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            lexer: CharLexer::new(source),
            tokens: vec![],
        }
    }

    /// Finishes the lexer and consumes it, producing a [`Vec<Token>`]
    /// containing the tokens it read.
    fn run(mut self) -> Result<Vec<Token>, LexError> {
        loop {
            self.skip_trivia();
            if self.lexer.is_finished() {
                break;
            }

            let token = self.next_token()?;
            trace!("Found {:?} {} at {:?}", token.kind, token, token.location);
            self.lexer.consume(token.length());
            self.tokens.push(token);
        }

        let eof = Token::new(TokenKind::Eof, "", self.lexer.location());
        self.tokens.push(eof);

        debug!("Tokenization complete, found {} tokens", self.tokens.len());
        Ok(self.tokens)
    }

    /// Skips past whitespace and comments. Comments run from a `#` to the end of the line.
    fn skip_trivia(&mut self) {
        loop {
            self.lexer.consume_while(|ch| ch.is_whitespace());

            if self.lexer.peek() != Some('#') {
                break;
            }
            trace!("Found comment at line {}", self.lexer.location().line());
            self.lexer.consume_while(CharExt::is_not_linebreak);
        }
    }

    /// Reads the next token without consuming it.
    fn next_token(&self) -> Result<Token, LexError> {
        self.word()
            .or_else(|| self.symbol())
            .map(Ok)
            .or_else(|| self.number())
            .unwrap_or_else(|| Err(self.invalid_character()))
    }

    /// Checks the next token without consuming it. If it's a keyword or an identifier,
    /// returns the token, wrapped in an [`Option`]. If it's something else,
    /// returns [`None`].
    fn word(&self) -> Option<Token> {
        let mut clone = self.lexer.clone();

        // The first character of an identifier may not be a digit.
        clone.peek().filter(CharExt::is_identifier_start)?;

        let word = clone.consume_while(CharExt::is_identifier_continue);

        let kind = match Keyword::lookup(&word) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(word.clone()),
        };
        Some(self.make_token(kind, word))
    }

    /// Checks the next token without consuming it. If it's a symbol,
    /// returns the token, wrapped in an [`Option`]. If it's something else,
    /// returns [`None`].
    fn symbol(&self) -> Option<Token> {
        let mut iter = self.lexer.clone();

        let first = iter.try_next()?;
        let second = iter.try_next();

        // Try matching two-char symbols first
        match (first, second) {
            ('=', Some('=')) => Some(Symbol::Eq),
            ('!', Some('=')) => Some(Symbol::Neq),
            ('<', Some('=')) => Some(Symbol::Lte),
            ('>', Some('=')) => Some(Symbol::Gte),
            _ => None,
        }
        .or_else(|| {
            // Now try matching one-char symbols
            Some(match first {
                '+' => Symbol::Plus,
                '-' => Symbol::Minus,
                '*' => Symbol::Asterisk,
                '/' => Symbol::Slash,
                '=' => Symbol::Assign,
                '<' => Symbol::Lt,
                '>' => Symbol::Gt,
                '(' => Symbol::OpenParen,
                ')' => Symbol::CloseParen,
                '{' => Symbol::OpenBrace,
                '}' => Symbol::CloseBrace,
                ';' => Symbol::Semicolon,
                _ => return None,
            })
        })
        .map(|symbol| self.make_token(TokenKind::Symbol(symbol), symbol.to_string()))
    }

    /// Checks the next token without consuming it.
    /// If it is not a numeric literal, returns [`None`],
    /// If it is an invalid literal, returns an error, wrapped in [`Some(Err())`]
    /// If it is a valid literal, returns it, wrapped in [`Some(Ok())`]
    fn number(&self) -> LexResult<Token> {
        let mut lexer = self.lexer.clone();

        lexer.peek().filter(char::is_ascii_digit)?;

        let text = lexer.consume_while(CharExt::is_numeral_part);

        let mut points = text.char_indices().filter(|(_, ch)| *ch == '.');
        let is_float = points.next().is_some();
        if let Some((offset, _)) = points.next() {
            // Numerals never span lines, so the byte offset is also a column offset.
            let start = self.lexer.location();
            let location = Location::new(start.line(), start.column() + offset);
            return Some(Err(LexError::new(
                location,
                ErrorType::MultipleDecimalPoints,
            )));
        }

        let literal = if is_float {
            // Digits with a single point always form a valid float, including "1.".
            text.parse().map(Literal::Float).map_err(|_| {
                self.make_error(ErrorType::IntegerLiteral(text.clone()))
            })
        } else {
            text.parse().map(Literal::Integer).map_err(|err: ParseIntError| {
                self.make_error(ErrorType::IntegerLiteral(err.to_string()))
            })
        };

        Some(literal.map(|lit| self.make_token(TokenKind::Literal(lit), text)))
    }

    fn invalid_character(&self) -> LexError {
        let mut lexer = self.lexer.clone();
        match lexer.try_next() {
            Some(ch) => self.make_error(ErrorType::InvalidCharacter(ch)),
            None => unreachable!("Attempted to read a token past the end of the input"),
        }
    }

    fn make_error(&self, error_type: ErrorType) -> LexError {
        LexError::new(self.lexer.location(), error_type)
    }

    /// Constructs a token of [`TokenKind`] `kind` starting at the lexer's current location.
    fn make_token(&self, kind: TokenKind, lexeme: String) -> Token {
        Token::new(kind, lexeme, self.lexer.location())
    }
}

use crate::{
    lexer::tokens::*,
    location::Location,
};

use super::error::*;

/// How deeply expressions and blocks may nest before parsing is abandoned.
/// Later stages walk the tree recursively, so this also bounds their stack use.
pub const MAX_NESTING: usize = 128;

/// A cursor over a token stream with a single token of lookahead.
///
/// The cursor never advances past the final [`TokenKind::Eof`] token. If the
/// stream is not terminated by one, a synthetic end-of-input token is used instead.
pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    eof: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let eof_location = tokens
            .last()
            .map(|token| token.location)
            .unwrap_or_else(Location::start);

        Self {
            tokens,
            position: 0,
            eof: Token::new(TokenKind::Eof, "", eof_location),
            depth: 0,
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.eof)
    }

    /// Consumes the next token.
    pub fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    /// Returns `true` if the next token is of the given kind.
    pub fn at(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    pub fn at_symbol(&self, symbol: Symbol) -> bool {
        self.at(&TokenKind::Symbol(symbol))
    }

    pub fn at_keyword(&self, keyword: Keyword) -> bool {
        self.at(&TokenKind::Keyword(keyword))
    }

    /// Tries to read a token of the given kind. If the token does not match, the parser is not
    /// advanced, and an error is returned instead.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Reason> {
        if self.at(&kind) {
            Ok(self.next())
        } else {
            Err(Reason::Expected(kind, self.peek().clone()))
        }
    }

    pub fn expect_symbol(&mut self, symbol: Symbol) -> Result<Token, Reason> {
        self.expect(TokenKind::Symbol(symbol))
    }

    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, Reason> {
        self.expect(TokenKind::Keyword(keyword))
    }

    /// Enters one level of nesting, opened by `token`. Fails once [`MAX_NESTING`] is reached.
    pub fn descend(&mut self, token: &Token) -> Result<(), Reason> {
        if self.depth >= MAX_NESTING {
            return Err(Reason::TooDeeplyNested(token.clone()));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Reads an identifier, returning its name and location.
    pub fn expect_identifier(&mut self) -> Result<(String, Location), Reason> {
        match &self.peek().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let token = self.next();
                Ok((name, token.location))
            }
            _ => Err(Reason::Expected(
                TokenKind::Identifier(String::new()),
                self.peek().clone(),
            )),
        }
    }
}

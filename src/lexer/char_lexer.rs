use std::{iter::Peekable, str::Chars};

use crate::location::Location;

/// Abstraction over a peekable char iterator with line and column information.
///
/// Since it only holds an iterator and a location, this type is very
/// lightweight, making it easy to clone in order to handle lookahead.
#[derive(Clone)]
pub struct CharLexer<'a> {
    chars: Peekable<Chars<'a>>,
    location: Location,
}

impl<'a> CharLexer<'a> {
    /// Constructs a new [`CharLexer`] for the given source string,
    /// starting at line 1, column 1.
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            location: Location::start(),
        }
    }

    /// Tries to advance the lexer by one character.
    /// Returns the character wrapped in an [`Option`] if it was successful,
    /// or [`None`] if the lexer cannot advance any further.
    ///
    /// A line break moves the lexer to the first column of the next line.
    pub fn try_next(&mut self) -> Option<char> {
        let next = self.chars.next();
        if let Some(ch) = next {
            self.location = if ch == '\n' {
                Location::new(self.location.line() + 1, 1)
            } else {
                Location::new(self.location.line(), self.location.column() + 1)
            };
        }
        next
    }

    /// Returns the next character without consuming it.
    /// Returns [`None`] if the lexer cannot advance any further.
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// The location of the next character.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Consumes up to `count` characters.
    pub fn consume(&mut self, count: usize) {
        for _ in 0..count {
            if self.try_next().is_none() {
                break;
            }
        }
    }

    /// Consumes characters while `P(char)` evaluates to `true`.
    /// Returns a [`String`] containing the consumed characters.
    pub fn consume_while<P>(&mut self, mut predicate: P) -> String
    where
        P: FnMut(&char) -> bool,
    {
        let mut matches = String::new();
        while let Some(ch) = self.chars.peek().copied() {
            if predicate(&ch) {
                matches.push(ch);
                self.try_next();
            } else {
                break;
            }
        }
        matches
    }

    /// Checks if the lexer is finished.
    pub fn is_finished(&mut self) -> bool {
        self.peek().is_none()
    }
}

//! Contains the [`Location`] type, which describes source code positions.
use std::fmt::{self, Debug, Display};

/// A 1-indexed line and column in the source code.
///
/// Columns count characters, not bytes, so a caret can be placed under the
/// offending character regardless of its encoded width.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    line: usize,
    column: usize,
}
impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The start of the source code.
    pub fn start() -> Self {
        Self::new(1, 1)
    }

    /// A location that does not point into the source code. Used for internal failures.
    pub fn unknown() -> Self {
        Self::new(0, 0)
    }

    pub fn is_unknown(&self) -> bool {
        self.line == 0
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

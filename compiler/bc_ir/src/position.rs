//! Source positions.
//!
//! Positions are 1-based `(line, column)` pairs. The lexer advances the
//! column for every character it reads and moves to the next line on `\n`.

use std::fmt;

/// A location in the source text.
///
/// Layout: 8 bytes total
/// - line: u32 - 1-based line number
/// - column: u32 - 1-based column number
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(C)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Position used for synthesized nodes that have no source location.
    pub const DUMMY: Position = Position { line: 0, column: 0 };

    /// Position of the first character of a file.
    pub const START: Position = Position { line: 1, column: 1 };

    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// Whether this is the dummy position.
    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.line == 0
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Position;
    crate::static_assert_size!(Position, 8);
}

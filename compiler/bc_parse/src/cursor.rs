//! Token cursor for navigating the token stream.
//!
//! Comments are dropped when the cursor is built, so the grammar never
//! sees them.

use bc_ir::{Position, Token, TokenKind};
use tracing::trace;

/// Cursor over the significant tokens of a file.
pub struct Cursor<'a> {
    tokens: Vec<&'a Token>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the first non-comment token.
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor {
            tokens: tokens.iter().filter(|t| !t.kind.is_comment()).collect(),
            pos: 0,
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).copied()
    }

    #[inline]
    pub fn current_kind(&self) -> Option<&'a TokenKind> {
        self.current().map(|t| &t.kind)
    }

    /// Position of the current token, or of the last token at end of input.
    pub fn current_position(&self) -> Position {
        self.current()
            .or_else(|| self.tokens.last().copied())
            .map_or(Position::START, |t| t.pos)
    }

    /// Check if the current token is exactly `kind`.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Consume and return the current token.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.current()?;
        trace!(pos = self.pos, kind = ?token.kind, "advance");
        self.pos += 1;
        Some(token)
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume an identifier, returning its name and position.
    pub fn eat_ident(&mut self) -> Option<(&'a str, Position)> {
        let token = self.current()?;
        match &token.kind {
            TokenKind::Ident(name) => {
                self.pos += 1;
                Some((name.as_str(), token.pos))
            }
            _ => None,
        }
    }
}

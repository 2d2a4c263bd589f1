//! Expression parsing.
//!
//! Atoms are literals, identifiers, calls `name(args, ...)` and
//! parenthesized expressions. Binary operators are handled by precedence
//! climbing: a call at minimum precedence `p` consumes operators of
//! precedence `>= p`, parsing each right-hand side at `p + 1`, which makes
//! every level left-associative.
//!
//! | Level | Operators |
//! |-------|-----------|
//! | 3 | `*` `/` |
//! | 2 | `+` `-` |
//! | 1 | `>` `<` `==` `!=` |

use bc_ir::{ArenaExhausted, BinaryOp, Call, ExprId, ExprKind, Ident, Literal, TokenKind};
use bc_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseFailure, Parser};

/// Lowest binding level; a full expression is parsed from here.
const MIN_PRECEDENCE: u8 = 1;

/// Expression parse failure.
///
/// An invalid expression has no error kind of its own: the statement that
/// asked for it decides which [`ParseError`] to report.
#[derive(Debug)]
pub(crate) enum ExprError {
    Invalid,
    Arena(ArenaExhausted),
}

impl From<ArenaExhausted> for ExprError {
    fn from(exhausted: ArenaExhausted) -> Self {
        ExprError::Arena(exhausted)
    }
}

impl ExprError {
    /// Report an invalid expression as `error`.
    #[cold]
    pub(crate) fn or_fail(self, error: ParseError) -> ParseFailure {
        match self {
            ExprError::Invalid => ParseFailure::Syntax(error),
            ExprError::Arena(exhausted) => ParseFailure::Arena(exhausted),
        }
    }
}

impl Parser<'_> {
    /// Parse a full expression.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ExprError> {
        self.parse_binary(MIN_PRECEDENCE)
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Result<ExprId, ExprError> {
        ensure_sufficient_stack(|| {
            let mut lhs = self.parse_atom()?;

            while let Some(op) = self.cursor.current_kind().and_then(BinaryOp::from_token) {
                if op.precedence() < min_precedence {
                    break;
                }
                let pos = self.cursor.current_position();
                self.cursor.advance();
                let rhs = self.parse_binary(op.precedence() + 1)?;
                lhs = self.alloc_expr(ExprKind::Binary { op, lhs, rhs }, pos)?;
            }

            Ok(lhs)
        })
    }

    fn parse_atom(&mut self) -> Result<ExprId, ExprError> {
        let Some(token) = self.cursor.current() else {
            return Err(ExprError::Invalid);
        };
        let pos = token.pos;

        match &token.kind {
            TokenKind::Number(digits) => {
                self.cursor.advance();
                Ok(self.alloc_expr(ExprKind::Literal(Literal::Number(digits.clone())), pos)?)
            }
            TokenKind::Str(text) => {
                self.cursor.advance();
                Ok(self.alloc_expr(ExprKind::Literal(Literal::Str(text.clone())), pos)?)
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                let ident = Ident::new(name.as_str(), pos);
                if self.cursor.eat(&TokenKind::LParen) {
                    let args = self.parse_call_args()?;
                    Ok(self.alloc_expr(ExprKind::Call(Call { callee: ident, args }), pos)?)
                } else {
                    Ok(self.alloc_expr(ExprKind::Ident(ident), pos)?)
                }
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                if !self.cursor.eat(&TokenKind::RParen) {
                    return Err(ExprError::Invalid);
                }
                Ok(self.alloc_expr(ExprKind::Brackets(inner), pos)?)
            }
            _ => Err(ExprError::Invalid),
        }
    }

    /// Parse `a, b, c)` after the opening `(` has been consumed.
    pub(crate) fn parse_call_args(&mut self) -> Result<Vec<ExprId>, ExprError> {
        let mut args = Vec::new();
        if self.cursor.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if self.cursor.eat(&TokenKind::Comma) {
                continue;
            }
            if self.cursor.eat(&TokenKind::RParen) {
                return Ok(args);
            }
            return Err(ExprError::Invalid);
        }
    }
}

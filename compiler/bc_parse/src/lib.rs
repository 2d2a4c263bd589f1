//! Recursive descent parser for bc.
//!
//! Statements are parsed by recursive descent, binary expressions by
//! precedence climbing. Every node is allocated from one bounded
//! [`AstArena`], sized by [`ParseConfig::arena_capacity`].
//!
//! There is no error recovery: the first syntax error stops parsing and
//! is returned as [`ParseFailure::Syntax`]. Running out of arena space is
//! reported separately as [`ParseFailure::Arena`].

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind, ParseFailure};

use bc_ir::{
    ArenaExhausted, AstArena, AstPrinter, Expr, ExprId, ExprKind, Position, Program, Stmt, StmtId,
    StmtKind, Token, DEFAULT_ARENA_CAPACITY,
};
use tracing::debug;

/// Parser settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseConfig {
    /// Byte budget of the AST arena.
    pub arena_capacity: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            arena_capacity: DEFAULT_ARENA_CAPACITY,
        }
    }
}

/// Parse a token stream into a program.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token], config: &ParseConfig) -> Result<Program, ParseFailure> {
    Parser::new(tokens, config).parse_program()
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: AstArena,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], config: &ParseConfig) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: AstArena::with_capacity(config.arena_capacity),
        }
    }

    /// Parse every top-level statement.
    pub fn parse_program(mut self) -> Result<Program, ParseFailure> {
        let mut stmts = Vec::new();
        while !self.cursor.is_at_end() {
            if let Some(stmt) = self.parse_statement()? {
                debug!(?stmt, "parsed top-level statement");
                stmts.push(stmt);
            }
        }
        debug!(
            exprs = self.arena.expr_count(),
            stmts = self.arena.stmt_count(),
            used = self.arena.used(),
            "parsed program"
        );
        Ok(Program::new(self.arena, stmts))
    }

    #[inline]
    fn alloc_expr(&mut self, kind: ExprKind, pos: Position) -> Result<ExprId, ArenaExhausted> {
        self.arena.alloc_expr(Expr::new(kind, pos))
    }

    #[inline]
    fn alloc_stmt(&mut self, kind: StmtKind, pos: Position) -> Result<StmtId, ArenaExhausted> {
        self.arena.alloc_stmt(Stmt::new(kind, pos))
    }

    fn printer(&self) -> AstPrinter<'_> {
        AstPrinter::new(&self.arena)
    }

    fn render_expr(&self, id: ExprId) -> String {
        self.printer().expr(id)
    }

    /// `name(a, b)` for hints.
    fn render_call(&self, name: &str, args: &[ExprId]) -> String {
        let printer = self.printer();
        let args: Vec<String> = args.iter().map(|&arg| printer.expr(arg)).collect();
        format!("{name}({})", args.join(", "))
    }
}

#[cfg(test)]
mod tests;

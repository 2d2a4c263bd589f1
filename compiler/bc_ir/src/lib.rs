//! bc IR - Tokens, AST and Arena Types
//!
//! This crate contains the core data structures shared by every stage of
//! the bc compiler:
//! - Source positions (line, column)
//! - Tokens produced by the lexer
//! - AST nodes (`Expr`, `Stmt`, `Program`)
//! - The bounded `AstArena` every node is allocated from
//! - `AstPrinter` for rendering nodes back to source-like text
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: No `Box<Expr>`, children are `ExprId`/`StmtId`
//!   indices into the arena.
//! - **Closed variants**: every node is an enum over a fixed set of shapes,
//!   consumers match exhaustively.
//! - **Bounded memory**: the arena has a fixed byte budget decided up front,
//!   running out of it is an error value, never a panic.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod position;
mod token;

pub use arena::{ArenaExhausted, AstArena, DEFAULT_ARENA_CAPACITY};
pub use ast::{
    AstPrinter, BinaryOp, Block, Call, Expr, ExprId, ExprKind, FunctionDef, Ident, Literal,
    MacroCall, MacroKind, Param, Program, Stmt, StmtId, StmtKind, TypeName, VarDecl,
};
pub use position::Position;
pub use token::{Token, TokenKind};

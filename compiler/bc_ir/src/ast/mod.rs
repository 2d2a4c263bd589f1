//! AST node types.
//!
//! The tree is flat: expressions and statements live in the [`AstArena`]
//! and refer to their children through [`ExprId`] / [`StmtId`] handles.
//! Lists that belong to one node (call arguments, block statements,
//! parameters) are stored inline as `Vec`s of handles.
//!
//! [`AstArena`]: crate::AstArena

mod printer;


use std::fmt;

use crate::{AstArena, Position, TokenKind};

pub use printer::AstPrinter;

/// Index into the expression storage of an [`AstArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Index into the statement storage of an [`AstArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct StmtId(u32);

impl StmtId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        StmtId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtId({})", self.0)
    }
}

/// The two declarable types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeName {
    Int,
    String,
}

impl TypeName {
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::String => "string",
        }
    }

    /// Map a type keyword token to its type name.
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(TypeName::Int),
            TokenKind::String => Some(TypeName::String),
            _ => None,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Comparison
    Gt,
    Lt,
    Eq,
    NotEq,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Eq => "==",
            Self::NotEq => "!=",
        }
    }

    /// Binding strength used by precedence climbing. Higher binds tighter.
    ///
    /// | Level | Operators |
    /// |-------|-----------|
    /// | 3 | `*` `/` |
    /// | 2 | `+` `-` |
    /// | 1 | `>` `<` `==` `!=` |
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div => 3,
            Self::Add | Self::Sub => 2,
            Self::Gt | Self::Lt | Self::Eq | Self::NotEq => 1,
        }
    }

    /// Whether the operator produces a 1/0 truth value.
    pub const fn is_comparison(self) -> bool {
        matches!(self, Self::Gt | Self::Lt | Self::Eq | Self::NotEq)
    }

    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Sub,
            TokenKind::Star => Self::Mul,
            TokenKind::Slash => Self::Div,
            TokenKind::Gt => Self::Gt,
            TokenKind::Lt => Self::Lt,
            TokenKind::EqEq => Self::Eq,
            TokenKind::NotEq => Self::NotEq,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// A name together with where it was written.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Ident {
    pub name: String,
    pub pos: Position,
}

impl Ident {
    pub fn new(name: impl Into<String>, pos: Position) -> Self {
        Ident {
            name: name.into(),
            pos,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    /// Decimal digits exactly as written.
    Number(String),
    /// String contents without the surrounding quotes.
    Str(String),
}

/// `callee(args...)`, either as an expression or as a statement.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Call {
    pub callee: Ident,
    pub args: Vec<ExprId>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Literal(Literal),
    Ident(Ident),
    /// A parenthesized sub-expression.
    Brackets(ExprId),
    Call(Call),
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Expr { kind, pos }
    }
}

/// A braced statement list.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Block {
    pub stmts: Vec<StmtId>,
}

/// `int x;` or `string s = expr;`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct VarDecl {
    pub ty: TypeName,
    pub name: Ident,
    pub init: Option<ExprId>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub ty: TypeName,
    pub name: Ident,
}

/// `fn <type> name(<type> a, ...) { ... }`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDef {
    pub return_ty: TypeName,
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: Block,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MacroKind {
    Asm,
    Include,
}

impl MacroKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            MacroKind::Asm => "asm!",
            MacroKind::Include => "include!",
        }
    }
}

/// `asm!(...)` / `include!(...)`. Argument shape is checked by codegen.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MacroCall {
    pub kind: MacroKind,
    pub args: Vec<ExprId>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    Return(ExprId),
    DeclareVariable(VarDecl),
    AssignVariable { name: Ident, value: ExprId },
    Scope(Block),
    If {
        cond: ExprId,
        then_block: Block,
        else_block: Option<Block>,
    },
    While { cond: ExprId, body: Block },
    FunctionDefinition(FunctionDef),
    Macro(MacroCall),
    /// A call whose result is discarded.
    Call(Call),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Position,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, pos: Position) -> Self {
        Stmt { kind, pos }
    }
}

/// A parsed source file: the arena plus its top-level statements in order.
pub struct Program {
    pub arena: AstArena,
    pub stmts: Vec<StmtId>,
}

impl Program {
    pub fn new(arena: AstArena, stmts: Vec<StmtId>) -> Self {
        Program { arena, stmts }
    }

    #[inline]
    #[track_caller]
    pub fn expr(&self, id: ExprId) -> &Expr {
        self.arena.get_expr(id)
    }

    #[inline]
    #[track_caller]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        self.arena.get_stmt(id)
    }

    /// Render the whole program as source-like text, one statement per line.
    pub fn render(&self) -> String {
        AstPrinter::new(&self.arena).program(&self.stmts)
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("stmts", &self.stmts.len())
            .field("arena", &self.arena)
            .finish()
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ExprId, StmtId};
    crate::static_assert_size!(ExprId, 4);
    crate::static_assert_size!(StmtId, 4);
}

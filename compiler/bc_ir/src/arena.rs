//! Bounded arena for AST nodes.
//!
//! Every expression and statement of a program is stored here, in two
//! contiguous vectors indexed by [`ExprId`] and [`StmtId`]. Nodes are never
//! freed individually; the arena is dropped as a whole once code generation
//! is done.
//!
//! The arena has a fixed byte budget chosen when it is created. Each
//! allocation is charged the in-memory size of the node; once the budget is
//! spent further allocations fail with [`ArenaExhausted`] instead of
//! growing.

use std::fmt;
use std::mem::size_of;

use crate::ast::{Expr, ExprId, Stmt, StmtId};

/// Byte budget used when no explicit capacity is configured (1 MiB).
pub const DEFAULT_ARENA_CAPACITY: usize = 1024 * 1024;

/// Allocation failure: the arena's byte budget is spent.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ArenaExhausted {
    /// Total byte budget of the arena.
    pub capacity: usize,
    /// Bytes already charged when the allocation was attempted.
    pub used: usize,
    /// Bytes the failed allocation asked for.
    pub requested: usize,
}

impl fmt::Display for ArenaExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AST arena exhausted: requested {} bytes with {} of {} bytes in use",
            self.requested, self.used, self.capacity
        )
    }
}

impl std::error::Error for ArenaExhausted {}

/// Contiguous, capacity-bounded storage for all AST nodes of one program.
pub struct AstArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    capacity: usize,
    used: usize,
}

impl AstArena {
    /// Create an arena with the default 1 MiB budget.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ARENA_CAPACITY)
    }

    /// Create an arena with a byte budget of `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        AstArena {
            exprs: Vec::new(),
            stmts: Vec::new(),
            capacity,
            used: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes charged so far.
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }

    fn charge(&mut self, requested: usize) -> Result<(), ArenaExhausted> {
        if requested > self.remaining() {
            return Err(self.exhausted(requested));
        }
        self.used += requested;
        Ok(())
    }

    #[cold]
    fn exhausted(&self, requested: usize) -> ArenaExhausted {
        ArenaExhausted {
            capacity: self.capacity,
            used: self.used,
            requested,
        }
    }

    // ===== Expression allocation =====

    /// Allocate an expression, returning its handle.
    pub fn alloc_expr(&mut self, expr: Expr) -> Result<ExprId, ArenaExhausted> {
        let requested = size_of::<Expr>();
        let index = u32::try_from(self.exprs.len()).map_err(|_| self.exhausted(requested))?;
        self.charge(requested)?;
        self.exprs.push(expr);
        Ok(ExprId::new(index))
    }

    /// Get an expression by handle.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // ===== Statement allocation =====

    /// Allocate a statement, returning its handle.
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> Result<StmtId, ArenaExhausted> {
        let requested = size_of::<Stmt>();
        let index = u32::try_from(self.stmts.len()).map_err(|_| self.exhausted(requested))?;
        self.charge(requested)?;
        self.stmts.push(stmt);
        Ok(StmtId::new(index))
    }

    /// Get a statement by handle.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this arena.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AstArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstArena")
            .field("exprs", &self.exprs.len())
            .field("stmts", &self.stmts.len())
            .field("used", &self.used)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests;

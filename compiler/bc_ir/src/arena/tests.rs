#![allow(clippy::unwrap_used)]

use super::*;
use crate::ast::{ExprKind, Literal, StmtKind};
use crate::Position;

fn number(text: &str) -> Expr {
    Expr::new(
        ExprKind::Literal(Literal::Number(text.to_string())),
        Position::START,
    )
}

#[test]
fn test_alloc_and_get() {
    let mut arena = AstArena::new();
    let a = arena.alloc_expr(number("1")).unwrap();
    let b = arena.alloc_expr(number("2")).unwrap();

    assert_ne!(a, b);
    assert_eq!(arena.get_expr(a), &number("1"));
    assert_eq!(arena.get_expr(b), &number("2"));
    assert_eq!(arena.expr_count(), 2);
}

#[test]
fn test_charges_node_size() {
    let mut arena = AstArena::new();
    assert_eq!(arena.used(), 0);

    let value = arena.alloc_expr(number("7")).unwrap();
    assert_eq!(arena.used(), size_of::<Expr>());

    arena
        .alloc_stmt(Stmt::new(StmtKind::Return(value), Position::START))
        .unwrap();
    assert_eq!(arena.used(), size_of::<Expr>() + size_of::<Stmt>());
    assert_eq!(arena.stmt_count(), 1);
}

#[test]
fn test_exhaustion_is_an_error() {
    let mut arena = AstArena::with_capacity(size_of::<Expr>() * 2);
    assert!(arena.alloc_expr(number("1")).is_ok());
    assert!(arena.alloc_expr(number("2")).is_ok());

    let err = arena.alloc_expr(number("3"));
    assert_eq!(
        err,
        Err(ArenaExhausted {
            capacity: size_of::<Expr>() * 2,
            used: size_of::<Expr>() * 2,
            requested: size_of::<Expr>(),
        })
    );
    // A failed allocation leaves the arena untouched.
    assert_eq!(arena.expr_count(), 2);
    assert_eq!(arena.remaining(), 0);
}

#[test]
fn test_zero_capacity() {
    let mut arena = AstArena::with_capacity(0);
    assert!(arena.alloc_expr(number("1")).is_err());
}

#[test]
fn test_exhausted_display() {
    let err = ArenaExhausted {
        capacity: 64,
        used: 60,
        requested: 16,
    };
    assert_eq!(
        err.to_string(),
        "AST arena exhausted: requested 16 bytes with 60 of 64 bytes in use"
    );
}

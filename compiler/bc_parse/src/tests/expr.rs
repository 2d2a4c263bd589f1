use bc_ir::{AstPrinter, BinaryOp, ExprKind, Literal};
use pretty_assertions::assert_eq;

use super::parse_expr;

fn render(source: &str) -> String {
    let (program, id) = parse_expr(source);
    AstPrinter::new(&program.arena).expr(id)
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(render("1 + 2 * 3"), "1 + (2 * 3)");
    assert_eq!(render("1 * 2 + 3"), "(1 * 2) + 3");
}

#[test]
fn test_arithmetic_binds_tighter_than_comparison() {
    assert_eq!(render("1 + 2 > 3"), "(1 + 2) > 3");
    assert_eq!(render("a < b - 1"), "a < (b - 1)");
}

#[test]
fn test_same_level_is_left_associative() {
    assert_eq!(render("a == b == c"), "(a == b) == c");
    assert_eq!(render("10 - 4 - 3"), "(10 - 4) - 3");
    assert_eq!(render("8 / 2 / 2"), "(8 / 2) / 2");
}

#[test]
fn test_brackets_override_precedence() {
    let (program, id) = parse_expr("(1 + 2) * 3");
    let ExprKind::Binary { op, lhs, .. } = &program.expr(id).kind else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, BinaryOp::Mul);
    assert!(matches!(program.expr(*lhs).kind, ExprKind::Brackets(_)));
    assert_eq!(AstPrinter::new(&program.arena).expr(id), "(1 + 2) * 3");
}

#[test]
fn test_calls_in_expressions() {
    assert_eq!(render("add(1, 2 * x) + f()"), "add(1, (2 * x)) + f()");
}

#[test]
fn test_literals() {
    let (program, id) = parse_expr("\"hello\"");
    assert_eq!(
        program.expr(id).kind,
        ExprKind::Literal(Literal::Str("hello".into()))
    );

    let (program, id) = parse_expr("42");
    assert_eq!(
        program.expr(id).kind,
        ExprKind::Literal(Literal::Number("42".into()))
    );
}

#[test]
fn test_deeply_nested_brackets() {
    let depth = 2_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let (program, mut id) = parse_expr(&source);
    for _ in 0..depth {
        let ExprKind::Brackets(inner) = program.expr(id).kind else {
            panic!("expected brackets");
        };
        id = inner;
    }
    assert!(matches!(program.expr(id).kind, ExprKind::Literal(_)));
}

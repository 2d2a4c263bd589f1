#![allow(clippy::unwrap_used, clippy::expect_used)]

mod expr;

use bc_ir::{ExprId, Program, StmtKind};

use crate::{parse, ParseConfig, ParseError, ParseFailure};

fn parse_source(source: &str) -> Result<Program, ParseFailure> {
    let tokens = bc_lexer::lex(source);
    parse(&tokens, &ParseConfig::default())
}

fn parse_ok(source: &str) -> Program {
    parse_source(source).expect("source should parse")
}

fn parse_err(source: &str) -> ParseError {
    match parse_source(source) {
        Err(ParseFailure::Syntax(error)) => error,
        Err(other) => panic!("expected a syntax error, got {other:?}"),
        Ok(program) => panic!("expected a syntax error, parsed {}", program.render()),
    }
}

/// Parse `int r = <source>;` and return the initializer.
fn parse_expr(source: &str) -> (Program, ExprId) {
    let program = parse_ok(&format!("int r = {source};"));
    let StmtKind::DeclareVariable(decl) = &program.stmt(program.stmts[0]).kind else {
        panic!("expected a declaration");
    };
    let init = decl.init.expect("declaration has an initializer");
    (program, init)
}

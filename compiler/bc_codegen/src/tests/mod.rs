#![allow(clippy::unwrap_used, clippy::expect_used)]

mod errors;

use bc_ir::Program;
use bc_parse::{parse, ParseConfig};

use crate::{generate, CodegenConfig, CodegenErrorKind, CodegenOutput};

fn parse_ok(source: &str) -> Program {
    let tokens = bc_lexer::lex(source);
    parse(&tokens, &ParseConfig::default()).expect("source should parse")
}

fn compile(source: &str) -> CodegenOutput {
    compile_with(source, &CodegenConfig::default())
}

fn compile_with(source: &str, config: &CodegenConfig) -> CodegenOutput {
    generate(&parse_ok(source), config)
}

/// Assembly of a program that produced no errors.
fn assemble(source: &str) -> String {
    let output = compile(source);
    assert!(
        output.is_clean(),
        "unexpected errors: {:?} {:?}",
        output.errors,
        output.invalid_call
    );
    output.assembly
}

fn error_summary(output: &CodegenOutput) -> Vec<(CodegenErrorKind, String)> {
    output
        .errors
        .iter()
        .map(|error| (error.kind, error.name.clone()))
        .collect()
}

#[track_caller]
fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "expected to find\n{needle}\nin\n{haystack}"
    );
}

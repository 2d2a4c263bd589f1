#![allow(clippy::unwrap_used, clippy::expect_used)]

use bc_diagnostic::emitter::ColorMode;
use bc_diagnostic::ErrorCode;
use bc_ir::TokenKind;
use bc_parse::ParseConfig;
use pretty_assertions::assert_eq;

use crate::{compile, render_diagnostics, CompileConfig, ErrorPhase};

const ADD_PROGRAM: &str = "fn int add(int a, int b){ return a + b; } int r; r = add(2,3);";

fn config() -> CompileConfig {
    CompileConfig {
        file_path: "main.bc".to_string(),
        ..CompileConfig::default()
    }
}

fn codes(output: &crate::CompileOutput) -> Vec<ErrorCode> {
    output.diagnostics.iter().map(|diag| diag.code).collect()
}

#[test]
fn test_successful_compilation() {
    let output = compile(ADD_PROGRAM, &config());
    assert!(output.success);
    assert_eq!(output.error_phase, None);
    assert!(output.diagnostics.is_empty());
    assert!(output.assembly.starts_with("section .data\n"));
    assert!(output.assembly.contains("\tcall add\n"));
    assert!(output.program.is_some());
}

#[test]
fn test_tokens_are_kept() {
    let output = compile("int x;", &config());
    let kinds: Vec<&TokenKind> = output.tokens.iter().map(|token| &token.kind).collect();
    assert_eq!(kinds.len(), 3);
    assert_eq!(kinds[0], &TokenKind::Int);
    assert_eq!(kinds[2], &TokenKind::Semicolon);
}

#[test]
fn test_parse_error_stops_the_pipeline() {
    let output = compile("int x", &config());
    assert!(!output.success);
    assert_eq!(output.error_phase, Some(ErrorPhase::Parse));
    assert!(output.assembly.is_empty());
    assert!(output.program.is_none());
    assert_eq!(codes(&output), vec![ErrorCode::E1001]);
    // Tokens are still available for inspection.
    assert_eq!(output.tokens.len(), 2);
}

#[test]
fn test_arena_exhaustion_has_its_own_phase() {
    let config = CompileConfig {
        parse: ParseConfig { arena_capacity: 8 },
        ..config()
    };
    let output = compile("int x = 1;", &config);
    assert_eq!(output.error_phase, Some(ErrorPhase::Arena));
    assert_eq!(codes(&output), vec![ErrorCode::E9001]);
    assert!(output.assembly.is_empty());
}

#[test]
fn test_codegen_errors_keep_the_assembly() {
    let output = compile("int x; int x; x = 1;", &config());
    assert!(!output.success);
    assert_eq!(output.error_phase, Some(ErrorPhase::Codegen));
    assert_eq!(codes(&output), vec![ErrorCode::E2001]);
    assert!(!output.assembly.is_empty());
    assert!(output.program.is_some());
}

#[test]
fn test_validation_failure_discards_the_assembly() {
    let output = compile("fn int f(int a){return a;} f(1,2);", &config());
    assert!(!output.success);
    assert_eq!(output.error_phase, Some(ErrorPhase::Validation));
    assert_eq!(codes(&output), vec![ErrorCode::E3001]);
    assert!(output.assembly.is_empty());
}

#[test]
fn test_validation_outranks_codegen_errors() {
    let output = compile("y = 1; fn int f(int a){return a;} f();", &config());
    assert_eq!(output.error_phase, Some(ErrorPhase::Validation));
    assert_eq!(codes(&output), vec![ErrorCode::E2002, ErrorCode::E3001]);
}

#[test]
fn test_render_diagnostics() {
    let source = "int x";
    let output = compile(source, &config());
    let text = render_diagnostics(source, "main.bc", &output.diagnostics, ColorMode::Never);
    assert!(text.contains("error[E1001]: missing semicolon"), "{text}");
    assert!(text.contains("main.bc"), "{text}");
    assert!(text.contains("error: aborting due to previous error"), "{text}");
    assert!(!text.contains('\x1b'));
}

#[test]
fn test_render_diagnostics_with_forced_color() {
    let source = "int x";
    let output = compile(source, &config());
    let text = render_diagnostics(source, "main.bc", &output.diagnostics, ColorMode::Always);
    assert!(text.contains('\x1b'));
}

#[test]
fn test_render_nothing() {
    assert_eq!(render_diagnostics("", "main.bc", &[], ColorMode::Never), "");
}

#[test]
fn test_error_phase_display() {
    assert_eq!(ErrorPhase::Parse.to_string(), "parse");
    assert_eq!(ErrorPhase::Arena.to_string(), "arena");
    assert_eq!(ErrorPhase::Codegen.to_string(), "codegen");
    assert_eq!(ErrorPhase::Validation.to_string(), "validation");
}

#[test]
fn test_init_tracing_is_idempotent() {
    crate::init_tracing();
    crate::init_tracing();
}

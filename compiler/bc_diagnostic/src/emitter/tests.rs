#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

fn missing_semicolon() -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message("missing semicolon")
        .with_label(Position::new(1, 10), "expected `;`")
        .with_hint("int x = 5")
}

fn render(diagnostic: &Diagnostic, source: Option<&str>) -> String {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
    if let Some(text) = source {
        emitter = emitter.with_source("main.bc", text);
    }
    emitter.emit(diagnostic);
    emitter.flush();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_snippet_with_caret() {
    let text = render(&missing_semicolon(), Some("int x = 5\nint y;\n"));
    assert_eq!(
        text,
        "error[E1001]: missing semicolon\n\
         \x20 --> main.bc:1:10\n\
         \x20  |\n\
         \x201 | int x = 5\n\
         \x20  |          ^ expected `;`\n\
         \x20  = hint: int x = 5\n\
         \n"
    );
}

#[test]
fn test_without_source_uses_compact_position() {
    let text = render(&missing_semicolon(), None);
    assert!(text.starts_with("error[E1001]: missing semicolon\n"));
    assert!(text.contains("--> 1:10: expected `;`"));
    assert!(text.contains("= hint: int x = 5"));
}

#[test]
fn test_position_past_end_of_source() {
    let diag = Diagnostic::error(ErrorCode::E1004)
        .with_message("scope not closed")
        .with_label(Position::new(7, 1), "expected `}`");
    let text = render(&diag, Some("{\n"));
    assert!(text.contains("--> main.bc:7:1"));
    assert!(text.contains("= expected `}`"));
}

#[test]
fn test_color_mode() {
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert_eq!(ColorMode::from_flag("always"), Some(ColorMode::Always));
    assert_eq!(ColorMode::from_flag("sometimes"), None);
}

#[test]
fn test_colored_output_has_escapes() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Always, false);
    emitter.emit(&missing_semicolon());
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("\x1b["));
    assert!(text.contains("E1001"));
}

#[test]
fn test_summary() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
    emitter.emit_summary(2);
    emitter.emit_summary(0);
    emitter.emit_summary(1);
    let text = String::from_utf8(output).unwrap();
    assert_eq!(
        text,
        "error: aborting due to 2 previous errors\n\
         error: aborting due to previous error\n"
    );
}

#[test]
fn test_report_ends_with_summary() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false)
        .with_source("main.bc", "int x = 5\n");
    emitter.emit_report(&[missing_semicolon(), missing_semicolon()]);
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.matches("error[E1001]: missing semicolon\n").count(), 2);
    assert!(text.ends_with("\nerror: aborting due to 2 previous errors\n"), "{text}");
}

#[test]
fn test_empty_report_writes_nothing() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
    emitter.emit_report(&[]);
    assert!(output.is_empty());
}

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_builder_collects_parts() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("variable `x` is already defined in this scope")
        .with_label(Position::new(2, 6), "redeclared here")
        .with_secondary_label(Position::new(1, 6), "first declared here")
        .with_note("shadowing is only allowed in nested scopes");

    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.primary_position(), Some(Position::new(2, 6)));
    assert_eq!(diag.notes.len(), 1);
    assert!(diag.hints.is_empty());
}

#[test]
fn test_primary_position_skips_secondary_labels() {
    let diag = Diagnostic::error(ErrorCode::E2005)
        .with_secondary_label(Position::new(1, 1), "context")
        .with_label(Position::new(3, 4), "here");

    assert_eq!(diag.primary_position(), Some(Position::new(3, 4)));
}

#[test]
fn test_no_labels_has_no_position() {
    let diag = Diagnostic::error(ErrorCode::E9001).with_message("out of memory");
    assert_eq!(diag.primary_position(), None);
}

#[test]
fn test_display() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("missing semicolon")
        .with_label(Position::new(1, 10), "expected `;`")
        .with_hint("int x")
        .with_note("every statement ends with `;`");

    assert_eq!(
        diag.to_string(),
        "error[E1001]: missing semicolon\n  \
         --> 1:10: expected `;`\n  \
         = hint: int x\n  \
         = note: every statement ends with `;`"
    );
}

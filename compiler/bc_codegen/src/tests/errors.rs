use bc_diagnostic::ErrorCode;
use bc_ir::TypeName;
use pretty_assertions::assert_eq;

use super::{assert_contains, compile, compile_with, error_summary};
use crate::{CodegenConfig, CodegenErrorKind, InvalidCallReason};

#[test]
fn test_redeclaration_is_reported_once() {
    let output = compile("int x; int x;");
    assert_eq!(
        error_summary(&output),
        vec![(CodegenErrorKind::VariableAlreadyDefined, "x".to_string())]
    );
    // The first declaration is kept, the second skipped.
    assert_eq!(output.assembly.matches("Declaring variable named `x`").count(), 1);
    assert!(output.invalid_call.is_none());
}

#[test]
fn test_nested_block_may_shadow_an_outer_variable() {
    let output = compile("int x; { int x; x = 2; } x = 1;");
    assert!(output.is_clean(), "{:?}", output.errors);

    let output = compile("int x; { int x; int y; x = 2; } x = 1;");
    assert!(output.is_clean(), "{:?}", output.errors);
    // The inner `x` sits below `y`; the outer one is addressed after the block.
    assert_contains(
        &output.assembly,
        "\tmov QWORD [rsp + 8], 2\n\
         \tadd rsp, 16\n\
         \tmov QWORD [rsp + 0], 1\n",
    );
}

#[test]
fn test_redeclaration_inside_one_block() {
    let output = compile("int x; { int x; int x; }");
    assert_eq!(
        error_summary(&output),
        vec![(CodegenErrorKind::VariableAlreadyDefined, "x".to_string())]
    );
}

#[test]
fn test_duplicate_parameter_is_rejected() {
    let output = compile("fn int f(int a, int a) { return a; }");
    assert_eq!(
        error_summary(&output),
        vec![(CodegenErrorKind::VariableAlreadyDefined, "a".to_string())]
    );
}

#[test]
fn test_undeclared_variables_in_statement_order() {
    let output = compile("x = 1; int y; y = z;");
    assert_eq!(
        error_summary(&output),
        vec![
            (CodegenErrorKind::UndeclaredVariable, "x".to_string()),
            (CodegenErrorKind::UndeclaredVariable, "z".to_string()),
        ]
    );
    // Generation carries on after an error.
    assert_contains(&output.assembly, "Declaring variable named `y`");
}

#[test]
fn test_function_bodies_do_not_see_outer_variables() {
    let output = compile("int x; fn int f() { return x; }");
    assert_eq!(
        error_summary(&output),
        vec![(CodegenErrorKind::UndeclaredVariable, "x".to_string())]
    );
}

#[test]
fn test_nested_function_definition() {
    let output = compile("fn int f() { fn int g() { return 0; } return 1; }");
    assert_eq!(
        error_summary(&output),
        vec![(CodegenErrorKind::NestedFunctionDefinition, "g".to_string())]
    );
    assert_contains(&output.assembly, "\nf:\n");
    assert!(!output.assembly.contains("\ng:\n"));
}

#[test]
fn test_include_is_unsupported() {
    let output = compile("include!(\"lib.bc\");");
    assert_eq!(
        error_summary(&output),
        vec![(CodegenErrorKind::UnsupportedMacro, "include!".to_string())]
    );
    assert!(!output.assembly.contains("lib.bc"));
}

#[test]
fn test_malformed_macro_arguments() {
    let output = compile("asm!(\"nop\", \"nop\"); asm!(1); include!(x);");
    assert_eq!(
        error_summary(&output),
        vec![
            (
                CodegenErrorKind::MacroArgumentCount { found: 2 },
                "asm!".to_string()
            ),
            (CodegenErrorKind::MacroArgumentNotString, "asm!".to_string()),
            (CodegenErrorKind::MacroArgumentNotString, "include!".to_string()),
        ]
    );
    assert!(!output.assembly.contains("\nnop\n"));
}

#[test]
fn test_arity_mismatch_discards_the_assembly() {
    let output = compile("fn int f(int a){return a;} f(1,2);");
    assert!(output.assembly.is_empty());
    let invalid = output.invalid_call.expect("call should be rejected");
    assert_eq!(invalid.name, "f");
    assert_eq!(
        invalid.reason,
        InvalidCallReason::Arity {
            expected: 1,
            found: 2
        }
    );
    assert_eq!(invalid.to_string(), "the function call `f` is invalid");
}

#[test]
fn test_argument_type_mismatch() {
    let output = compile("fn int f(string s) { return 0; } f(1);");
    assert!(output.assembly.is_empty());
    assert_eq!(
        output.invalid_call.map(|invalid| invalid.reason),
        Some(InvalidCallReason::ArgumentType {
            index: 0,
            expected: TypeName::String,
            found: TypeName::Int,
        })
    );
}

#[test]
fn test_argument_type_from_variable_declaration() {
    let output = compile("string s; fn int f(int a) { return a; } f(s);");
    assert_eq!(
        output.invalid_call.map(|invalid| invalid.reason),
        Some(InvalidCallReason::ArgumentType {
            index: 0,
            expected: TypeName::Int,
            found: TypeName::String,
        })
    );
}

#[test]
fn test_call_before_definition_is_validated() {
    let output = compile("f(1, 2); fn int f(int a) { return a; }");
    assert!(output.assembly.is_empty());
    assert_eq!(output.invalid_call.map(|invalid| invalid.name), Some("f".to_string()));
}

#[test]
fn test_nested_calls_are_validated_only_on_request() {
    let source = "fn int f(int a) { return a; } { f(); }";
    let relaxed = compile(source);
    assert!(relaxed.is_clean());
    assert!(!relaxed.assembly.is_empty());

    let strict = compile_with(
        source,
        &CodegenConfig {
            validate_nested_calls: true,
        },
    );
    assert!(strict.assembly.is_empty());
    assert_eq!(
        strict.invalid_call.map(|invalid| invalid.reason),
        Some(InvalidCallReason::Arity {
            expected: 1,
            found: 0
        })
    );
}

#[test]
fn test_calls_to_unknown_functions_are_accepted() {
    let output = compile("print(\"hi\");");
    assert!(output.is_clean());
    assert_contains(&output.assembly, "\tcall print\n");
}

#[test]
fn test_diagnostics_carry_phase_codes() {
    let output = compile("int x; int x; y = 1; fn int f(int a) { return a; } f();");
    let codes: Vec<ErrorCode> = output.diagnostics().iter().map(|diag| diag.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2001, ErrorCode::E2002, ErrorCode::E3001]);
}

#[test]
fn test_error_display() {
    let output = compile("int x; int x;");
    assert_eq!(output.errors[0].to_string(), "VariableAlreadyDefined: x");
    assert_eq!(
        output.errors[0].message(),
        "variable `x` is already defined"
    );
}

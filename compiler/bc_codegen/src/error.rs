//! Generation and validation errors.
//!
//! [`CodegenError`]s are not fatal: the offending statement is skipped (or
//! partially lowered) and generation carries on. They are collected per
//! top-level statement and handed back with the assembly.
//!
//! [`InvalidCall`] is produced by the post-pass call validation. It is fatal
//! for the whole program: the assembly is discarded.

use std::fmt;

use bc_diagnostic::{Diagnostic, ErrorCode};
use bc_ir::{Position, TypeName};

/// What went wrong while lowering a statement.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CodegenErrorKind {
    VariableAlreadyDefined,
    UndeclaredVariable,
    NestedFunctionDefinition,
    /// A macro called with other than exactly one argument.
    MacroArgumentCount { found: usize },
    /// A macro whose single argument is not a string literal.
    MacroArgumentNotString,
    /// A recognized macro with no lowering (`include!`).
    UnsupportedMacro,
}

impl CodegenErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            CodegenErrorKind::VariableAlreadyDefined => ErrorCode::E2001,
            CodegenErrorKind::UndeclaredVariable => ErrorCode::E2002,
            CodegenErrorKind::NestedFunctionDefinition => ErrorCode::E2003,
            CodegenErrorKind::MacroArgumentCount { .. }
            | CodegenErrorKind::MacroArgumentNotString => ErrorCode::E2004,
            CodegenErrorKind::UnsupportedMacro => ErrorCode::E2005,
        }
    }

    /// Short name used in log lines and `Display`.
    pub fn as_str(self) -> &'static str {
        match self {
            CodegenErrorKind::VariableAlreadyDefined => "VariableAlreadyDefined",
            CodegenErrorKind::UndeclaredVariable => "UndeclaredVariable",
            CodegenErrorKind::NestedFunctionDefinition => "NestedFunctionDefinition",
            CodegenErrorKind::MacroArgumentCount { .. } => "MacroArgumentCount",
            CodegenErrorKind::MacroArgumentNotString => "MacroArgumentNotString",
            CodegenErrorKind::UnsupportedMacro => "UnsupportedMacro",
        }
    }
}

impl fmt::Display for CodegenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal generation error.
///
/// `name` is the variable, function or macro the error is about.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("{kind}: {name}")]
pub struct CodegenError {
    pub kind: CodegenErrorKind,
    pub name: String,
    pub position: Position,
}

impl CodegenError {
    #[cold]
    pub fn new(kind: CodegenErrorKind, name: impl Into<String>, position: Position) -> Self {
        CodegenError {
            kind,
            name: name.into(),
            position,
        }
    }

    pub fn message(&self) -> String {
        let name = &self.name;
        match self.kind {
            CodegenErrorKind::VariableAlreadyDefined => {
                format!("variable `{name}` is already defined")
            }
            CodegenErrorKind::UndeclaredVariable => format!("use of undeclared variable `{name}`"),
            CodegenErrorKind::NestedFunctionDefinition => {
                format!("function `{name}` is defined inside another function")
            }
            CodegenErrorKind::MacroArgumentCount { found } => {
                format!("the `{name}` macro takes exactly 1 argument, but {found} were found")
            }
            CodegenErrorKind::MacroArgumentNotString => {
                format!("the `{name}` macro takes only a string literal argument")
            }
            CodegenErrorKind::UnsupportedMacro => format!("the `{name}` macro isn't supported yet"),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.kind.code())
            .with_message(self.message())
            .with_label(self.position, "here");
        match self.kind {
            CodegenErrorKind::VariableAlreadyDefined => {
                diag.with_note("a nested block may declare its own variable with this name")
            }
            CodegenErrorKind::NestedFunctionDefinition => {
                diag.with_note("functions can only be defined outside other functions")
            }
            CodegenErrorKind::UnsupportedMacro => {
                diag.with_note("the statement was skipped")
            }
            _ => diag,
        }
    }
}

/// Why a recorded call does not match the signature it resolves to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InvalidCallReason {
    Arity { expected: usize, found: usize },
    ArgumentType {
        index: usize,
        expected: TypeName,
        found: TypeName,
    },
}

impl fmt::Display for InvalidCallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidCallReason::Arity { expected, found } => {
                write!(f, "expected {expected} argument(s), found {found}")
            }
            InvalidCallReason::ArgumentType {
                index,
                expected,
                found,
            } => write!(
                f,
                "argument {} should be `{expected}`, found `{found}`",
                index + 1
            ),
        }
    }
}

/// A call site rejected by call validation.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("the function call `{name}` is invalid")]
pub struct InvalidCall {
    pub name: String,
    pub position: Position,
    /// Where the signature the call was checked against was declared.
    pub definition: Position,
    pub reason: InvalidCallReason,
}

impl InvalidCall {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::E3001)
            .with_message(self.to_string())
            .with_label(self.position, self.reason.to_string())
            .with_secondary_label(self.definition, format!("`{}` defined here", self.name))
            .with_note("no assembly was produced")
    }
}

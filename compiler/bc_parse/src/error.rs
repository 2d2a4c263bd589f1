//! Parse errors.
//!
//! Parsing stops at the first error. Each way a statement can fail has its
//! own [`ParseErrorKind`]; the error carries the position of the token the
//! failing statement started at and, when one is available, a rendering of
//! what had been parsed so far.

use std::fmt;

use bc_diagnostic::{Diagnostic, ErrorCode};
use bc_ir::{ArenaExhausted, Position, TokenKind};

/// What went wrong.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParseErrorKind {
    MissingSemicolon,
    InvalidExpression,
    InvalidVariableDeclaration,
    ScopeNotClosed,
    IfInvalidCondition,
    IfInvalidScope,
    WhileInvalidCondition,
    WhileInvalidScope,
    InvalidFunctionDefinitionReturn,
    InvalidFunctionDefinitionName,
    InvalidFunctionDefinitionOpenBracket,
    InvalidFunctionDefinitionParameters,
    InvalidFunctionDefinitionBody,
    InvalidFunctionCall,
    InvalidMacroCall,
    /// A token that cannot start a statement.
    UnexpectedToken { found: TokenKind },
}

impl ParseErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseErrorKind::MissingSemicolon => ErrorCode::E1001,
            ParseErrorKind::InvalidExpression => ErrorCode::E1002,
            ParseErrorKind::InvalidVariableDeclaration => ErrorCode::E1003,
            ParseErrorKind::ScopeNotClosed => ErrorCode::E1004,
            ParseErrorKind::IfInvalidCondition => ErrorCode::E1005,
            ParseErrorKind::IfInvalidScope => ErrorCode::E1006,
            ParseErrorKind::WhileInvalidCondition => ErrorCode::E1007,
            ParseErrorKind::WhileInvalidScope => ErrorCode::E1008,
            ParseErrorKind::InvalidFunctionDefinitionReturn => ErrorCode::E1009,
            ParseErrorKind::InvalidFunctionDefinitionName => ErrorCode::E1010,
            ParseErrorKind::InvalidFunctionDefinitionOpenBracket => ErrorCode::E1011,
            ParseErrorKind::InvalidFunctionDefinitionParameters => ErrorCode::E1012,
            ParseErrorKind::InvalidFunctionDefinitionBody => ErrorCode::E1013,
            ParseErrorKind::InvalidFunctionCall => ErrorCode::E1014,
            ParseErrorKind::InvalidMacroCall => ErrorCode::E1015,
            ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E1016,
        }
    }

    pub fn message(&self) -> String {
        let text = match self {
            ParseErrorKind::MissingSemicolon => "missing semicolon",
            ParseErrorKind::InvalidExpression => "invalid expression",
            ParseErrorKind::InvalidVariableDeclaration => "invalid variable declaration",
            ParseErrorKind::ScopeNotClosed => "scope not closed",
            ParseErrorKind::IfInvalidCondition => "`if` statement doesn't have a valid condition",
            ParseErrorKind::IfInvalidScope => "`if` statement doesn't have a valid scope",
            ParseErrorKind::WhileInvalidCondition => {
                "`while` statement doesn't have a valid condition"
            }
            ParseErrorKind::WhileInvalidScope => "`while` statement doesn't have a valid scope",
            ParseErrorKind::InvalidFunctionDefinitionReturn => {
                "the function definition doesn't have a valid return type"
            }
            ParseErrorKind::InvalidFunctionDefinitionName => {
                "the function definition doesn't have a valid name"
            }
            ParseErrorKind::InvalidFunctionDefinitionOpenBracket => {
                "the function definition doesn't open the parameter list"
            }
            ParseErrorKind::InvalidFunctionDefinitionParameters => {
                "the function definition has an invalid parameter list"
            }
            ParseErrorKind::InvalidFunctionDefinitionBody => {
                "the function definition doesn't have a valid body"
            }
            ParseErrorKind::InvalidFunctionCall => "invalid function call",
            ParseErrorKind::InvalidMacroCall => "invalid macro call",
            ParseErrorKind::UnexpectedToken { found } => {
                return format!("unexpected {} at the start of a statement", found.display_name());
            }
        };
        text.to_string()
    }

    /// Text shown under the caret.
    fn label(&self) -> &'static str {
        match self {
            ParseErrorKind::MissingSemicolon => "expected `;` after this statement",
            ParseErrorKind::ScopeNotClosed => "this `{` is never closed",
            ParseErrorKind::IfInvalidScope | ParseErrorKind::WhileInvalidScope => {
                "expected `{` after the condition"
            }
            ParseErrorKind::InvalidFunctionDefinitionReturn => "expected `int` or `string`",
            ParseErrorKind::InvalidFunctionDefinitionName => "expected a function name",
            ParseErrorKind::InvalidFunctionDefinitionOpenBracket => "expected `(`",
            ParseErrorKind::UnexpectedToken { .. } => "not a statement",
            _ => "in this statement",
        }
    }
}

/// A syntax error: the kind, the statement's starting position and an
/// optional rendering of the partially parsed fragment.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
    pub hint: Option<String>,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        ParseError {
            kind,
            position,
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.kind.code())
            .with_message(self.kind.message())
            .with_label(self.position, self.kind.label());
        match &self.hint {
            Some(hint) => diag.with_hint(hint),
            None => diag,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {} there's this error: {}", self.position, self.kind.message())?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Why no program was produced.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Syntax(#[from] ParseError),
    #[error(transparent)]
    Arena(#[from] ArenaExhausted),
}

impl ParseFailure {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseFailure::Syntax(error) => error.to_diagnostic(),
            ParseFailure::Arena(exhausted) => Diagnostic::error(ErrorCode::E9001)
                .with_message(exhausted.to_string())
                .with_note("the program has more AST nodes than the configured arena capacity"),
        }
    }
}

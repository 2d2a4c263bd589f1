use std::fmt;

use bc_ir::Position;

use crate::ErrorCode;

/// A source position with a message attached.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub position: Position,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(position: Position, message: impl Into<String>) -> Self {
        Label {
            position,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(position: Position, message: impl Into<String>) -> Self {
        Label {
            position,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A compiler diagnostic.
///
/// Built fluently from a code:
///
/// ```text
/// Diagnostic::error(ErrorCode::E1001)
///     .with_message("missing semicolon")
///     .with_label(pos, "expected `;` here")
///     .with_hint("int x")
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Main error message.
    pub message: String,
    /// Positions showing where the error occurred.
    pub labels: Vec<Label>,
    /// Best-effort rendering of what was being parsed or lowered.
    pub hints: Vec<String>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
            hints: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, position: Position, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(position, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(mut self, position: Position, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(position, message));
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Position of the first primary label.
    pub fn primary_position(&self) -> Option<Position> {
        self.labels
            .iter()
            .find(|label| label.is_primary)
            .map(|label| label.position)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {} {:?}: {}", marker, label.position, label.message)?;
        }

        for hint in &self.hints {
            write!(f, "\n  = hint: {hint}")?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

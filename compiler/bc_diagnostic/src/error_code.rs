use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit names the phase:
/// - E1xxx: Parse errors (fatal, first one stops parsing)
/// - E2xxx: Generation errors (reported per top-level statement)
/// - E3xxx: Call validation errors (fatal, output is discarded)
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Parse Errors (E1xxx)
    /// Missing semicolon
    E1001,
    /// Invalid expression
    E1002,
    /// Invalid variable declaration
    E1003,
    /// Scope not closed
    E1004,
    /// `if` without a valid condition
    E1005,
    /// `if` without a valid scope
    E1006,
    /// `while` without a valid condition
    E1007,
    /// `while` without a valid scope
    E1008,
    /// Invalid function definition return type
    E1009,
    /// Invalid function definition name
    E1010,
    /// Function definition without `(`
    E1011,
    /// Invalid function definition parameter list
    E1012,
    /// Invalid function definition body
    E1013,
    /// Invalid function call
    E1014,
    /// Invalid macro call
    E1015,
    /// Token cannot start a statement
    E1016,

    // Generation Errors (E2xxx)
    /// Variable already defined in this scope
    E2001,
    /// Assignment to an undeclared variable
    E2002,
    /// Function definition inside another function
    E2003,
    /// Macro called with the wrong arguments
    E2004,
    /// Macro recognized but not supported
    E2005,

    // Validation Errors (E3xxx)
    /// Call does not match the function signature
    E3001,

    // Internal Errors (E9xxx)
    /// AST arena exhausted
    E9001,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Parse
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E1013 => "E1013",
            ErrorCode::E1014 => "E1014",
            ErrorCode::E1015 => "E1015",
            ErrorCode::E1016 => "E1016",
            // Generation
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            // Validation
            ErrorCode::E3001 => "E3001",
            // Internal
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Check if this is a parse error (E1xxx).
    pub fn is_parse_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a generation error (E2xxx).
    pub fn is_generation_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is a call validation error (E3xxx).
    pub fn is_validation_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
        assert_eq!(ErrorCode::E3001.to_string(), "E3001");
        assert_eq!(ErrorCode::E9001.to_string(), "E9001");
    }

    #[test]
    fn test_phase_classification() {
        assert!(ErrorCode::E1016.is_parse_error());
        assert!(!ErrorCode::E1016.is_generation_error());
        assert!(ErrorCode::E2005.is_generation_error());
        assert!(ErrorCode::E3001.is_validation_error());
        assert!(!ErrorCode::E9001.is_parse_error());
    }
}

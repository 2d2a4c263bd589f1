//! Keyword resolution.
//!
//! Closed alphabetic runs are looked up here by exact text. The lookup
//! buckets by length first: keywords are 2-8 characters, so anything
//! outside that range is an identifier without any comparison.

use bc_ir::TokenKind;

/// Names that may be followed by `!` to form a macro keyword.
pub(crate) const MACRO_NAMES: [&str; 2] = ["asm", "include"];

/// Look up a keyword by text.
///
/// Returns `None` for identifiers.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    if !(2..=8).contains(&text.len()) {
        return None;
    }

    match text.len() {
        2 => match text {
            "if" => Some(TokenKind::If),
            "fn" => Some(TokenKind::Fn),
            _ => None,
        },
        3 => match text {
            "int" => Some(TokenKind::Int),
            _ => None,
        },
        4 => match text {
            "else" => Some(TokenKind::Else),
            "asm!" => Some(TokenKind::Asm),
            _ => None,
        },
        5 => match text {
            "while" => Some(TokenKind::While),
            _ => None,
        },
        6 => match text {
            "return" => Some(TokenKind::Return),
            "string" => Some(TokenKind::String),
            _ => None,
        },
        8 => match text {
            "include!" => Some(TokenKind::Include),
            _ => None,
        },
        _ => None,
    }
}

/// Whether `!` may extend the pending alphabetic run `text`.
#[inline]
pub(crate) fn accepts_bang(text: &str) -> bool {
    MACRO_NAMES.contains(&text)
}

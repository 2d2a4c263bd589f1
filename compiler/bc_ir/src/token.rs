//! Tokens produced by the lexer.
//!
//! A token is a kind plus the position at which the lexer closed it. Kinds
//! that carry text (identifiers, literals, comments, unknown characters)
//! hold it inline so the token list is self-contained.

use std::fmt;

use crate::Position;

/// Token kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Keywords
    Return,
    Int,
    String,
    If,
    Else,
    While,
    Fn,

    // Macro keywords
    /// `asm!`
    Asm,
    /// `include!`
    Include,

    /// Line comment text, without the leading `//` and trailing newline.
    Comment(String),

    Ident(String),

    /// Number literal, kept as its source digits.
    Number(String),
    /// String literal content, quotes stripped.
    Str(String),

    // Punctuation
    Semicolon,
    Comma,
    Eq,
    EqEq,
    NotEq,
    Gt,
    Lt,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    LBrace,
    RBrace,

    /// A character no token can start with.
    Unknown(char),
}

impl TokenKind {
    /// The text payload of the token, if it has one.
    pub fn text(&self) -> Option<&str> {
        match self {
            TokenKind::Comment(text)
            | TokenKind::Ident(text)
            | TokenKind::Number(text)
            | TokenKind::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this is one of the reserved type keywords (`int`, `string`).
    #[inline]
    pub fn is_type_keyword(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::String)
    }

    /// Whether this is a macro keyword (`asm!`, `include!`).
    #[inline]
    pub fn is_macro_keyword(&self) -> bool {
        matches!(self, TokenKind::Asm | TokenKind::Include)
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::Comment(_))
    }

    /// Short human-readable description used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Return => "`return`",
            TokenKind::Int => "`int`",
            TokenKind::String => "`string`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::Fn => "`fn`",
            TokenKind::Asm => "`asm!`",
            TokenKind::Include => "`include!`",
            TokenKind::Comment(_) => "comment",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Number(_) => "number literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Eq => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Gt => "`>`",
            TokenKind::Lt => "`<`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Unknown(_) => "unknown character",
        }
    }
}

/// Renders the token as it would appear in source.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Return => "return",
            TokenKind::Int => "int",
            TokenKind::String => "string",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Fn => "fn",
            TokenKind::Asm => "asm!",
            TokenKind::Include => "include!",
            TokenKind::Comment(text) => return write!(f, "//{text}"),
            TokenKind::Ident(text) | TokenKind::Number(text) => text,
            TokenKind::Str(text) => return write!(f, "\"{text}\""),
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Gt => ">",
            TokenKind::Lt => "<",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Unknown(c) => return write!(f, "{c}"),
        };
        f.write_str(text)
    }
}

/// A token with its source position.
///
/// Tokens are immutable once the lexer has produced them.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, pos: Position) -> Self {
        Token { kind, pos }
    }

    /// The text payload of the token, if it has one.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.kind.text()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:?}", self.kind, self.pos)
    }
}

//! Lexer for the bc language.
//!
//! The lexer is driven one character at a time. Characters accumulate in a
//! pending run whose kind (whitespace, word, number, punctuation, string,
//! comment) is fixed by its first character. After every character the run
//! is offered to its close rule; a close can hand the triggering character
//! back as the start of the next run, and that run may itself be complete
//! (`x;` closes `x` on `;` and then `;` on its own), so closing repeats
//! until nothing changes.
//!
//! Every token records the position of the character that was being
//! processed when it closed. End of input is flushed with one synthetic
//! whitespace character.
//!
//! Lexing is total: characters that cannot start any token become
//! [`TokenKind::Unknown`] and are left for the parser to reject.

mod keywords;
mod pending;

use bc_ir::{Position, Token, TokenKind};
use tracing::{debug, trace};

use pending::{Pending, Step};

/// Lex source text into tokens, comments included.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new();
    for c in source.chars() {
        lexer.feed(c);
    }
    let tokens = lexer.finish();
    debug!(count = tokens.len(), "lexed");
    tokens
}

struct Lexer {
    pending: Pending,
    tokens: Vec<Token>,
    line: u32,
    column: u32,
}

impl Lexer {
    fn new() -> Self {
        Lexer {
            pending: Pending::new(),
            tokens: Vec::new(),
            line: 1,
            column: 1,
        }
    }

    #[inline]
    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn feed(&mut self, c: char) {
        let pos = self.position();
        self.pending.push(c);
        self.settle(pos);

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Close the pending run until it is stable.
    fn settle(&mut self, pos: Position) {
        loop {
            match self.pending.close() {
                Step::Emit(kind) => self.emit(kind, pos),
                Step::Changed => {}
                Step::Stable => break,
            }
        }
    }

    fn emit(&mut self, kind: TokenKind, pos: Position) {
        trace!(?kind, ?pos, "token");
        self.tokens.push(Token::new(kind, pos));
    }

    fn finish(mut self) -> Vec<Token> {
        let pos = self.position();
        if let Some(kind) = self.pending.finish() {
            self.emit(kind, pos);
        }
        self.pending.push(' ');
        self.settle(pos);
        self.tokens
    }
}

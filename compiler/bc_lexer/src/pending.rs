//! The pending-token accumulator.
//!
//! Characters are appended one at a time. The first character fixes a
//! [`Hint`] for the run, and [`Pending::close`] applies the hint's rule to
//! decide whether the run is finished. A finished run may hand its last
//! character back as the seed of the next run, which is why the caller keeps
//! calling `close` until it reports [`Step::Stable`].

use bc_ir::TokenKind;

use crate::keywords;

/// Classification of the run being accumulated, fixed by its first character.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Hint {
    Empty,
    Space,
    Comment,
    Alphabetic,
    Sign,
    Number,
    Str,
    Unknown,
}

/// Outcome of one close attempt.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) enum Step {
    /// A token was completed.
    Emit(TokenKind),
    /// The run changed without producing a token; try again.
    Changed,
    /// Nothing more to do until the next character.
    Stable,
}

fn classify(c: char) -> Hint {
    match c {
        '0'..='9' => Hint::Number,
        '"' => Hint::Str,
        '=' | ';' | '>' | '<' | '+' | '-' | '*' | '/' | '(' | ')' | '{' | '}' | ',' | '!' => {
            Hint::Sign
        }
        c if c.is_whitespace() => Hint::Space,
        c if c.is_ascii_alphabetic() || c == '_' => Hint::Alphabetic,
        _ => Hint::Unknown,
    }
}

/// Punctuation that is complete as soon as it is seen.
fn single_sign(c: char) -> Option<TokenKind> {
    let kind = match c {
        ';' => TokenKind::Semicolon,
        ',' => TokenKind::Comma,
        '>' => TokenKind::Gt,
        '<' => TokenKind::Lt,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        _ => return None,
    };
    Some(kind)
}

pub(crate) struct Pending {
    text: String,
    hint: Hint,
}

impl Pending {
    pub(crate) fn new() -> Self {
        Pending {
            text: String::new(),
            hint: Hint::Empty,
        }
    }

    #[cfg(test)]
    pub(crate) fn hint(&self) -> Hint {
        self.hint
    }

    pub(crate) fn push(&mut self, c: char) {
        if self.text.is_empty() {
            self.hint = classify(c);
        }
        self.text.push(c);
    }

    fn reset(&mut self) {
        self.text.clear();
        self.hint = Hint::Empty;
    }

    /// Start a new run from `c`.
    fn reseed(&mut self, c: char) {
        self.reset();
        self.push(c);
    }

    /// Everything before the last character.
    fn head(&self, last: char) -> &str {
        &self.text[..self.text.len() - last.len_utf8()]
    }

    /// Take the finished run, reseeding with `last`.
    fn split_off_last(&mut self, last: char) -> String {
        let head = self.head(last).to_string();
        self.reseed(last);
        head
    }

    /// Try to complete the pending run after a character was pushed.
    pub(crate) fn close(&mut self) -> Step {
        let Some(last) = self.text.chars().next_back() else {
            return Step::Stable;
        };

        match self.hint {
            Hint::Empty => Step::Stable,
            Hint::Space => {
                if last.is_whitespace() {
                    Step::Stable
                } else {
                    self.reseed(last);
                    Step::Changed
                }
            }
            Hint::Comment => {
                if last == '\n' {
                    let body = comment_body(self.head(last)).to_string();
                    self.reset();
                    Step::Emit(TokenKind::Comment(body))
                } else {
                    Step::Stable
                }
            }
            Hint::Alphabetic => {
                if last.is_ascii_alphanumeric()
                    || last == '_'
                    || (last == '!' && keywords::accepts_bang(self.head(last)))
                {
                    return Step::Stable;
                }
                let word = self.split_off_last(last);
                let kind = keywords::lookup(&word).unwrap_or(TokenKind::Ident(word));
                Step::Emit(kind)
            }
            Hint::Number => {
                if last.is_ascii_digit() {
                    Step::Stable
                } else {
                    Step::Emit(TokenKind::Number(self.split_off_last(last)))
                }
            }
            Hint::Str => {
                let head = self.head(last);
                let escapes = head.chars().rev().take_while(|&c| c == '\\').count();
                if last == '"' && !head.is_empty() && escapes % 2 == 0 {
                    let body = head.strip_prefix('"').unwrap_or(head).to_string();
                    self.reset();
                    Step::Emit(TokenKind::Str(body))
                } else {
                    Step::Stable
                }
            }
            Hint::Sign => self.close_sign(last),
            Hint::Unknown => {
                self.reset();
                Step::Emit(TokenKind::Unknown(last))
            }
        }
    }

    /// Punctuation: single characters close at once, `=`, `!` and `/` wait
    /// for one more character.
    fn close_sign(&mut self, last: char) -> Step {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => match single_sign(c) {
                Some(kind) => {
                    self.reset();
                    Step::Emit(kind)
                }
                None => Step::Stable,
            },
            (Some('='), Some('=')) => {
                self.reset();
                Step::Emit(TokenKind::EqEq)
            }
            (Some('!'), Some('=')) => {
                self.reset();
                Step::Emit(TokenKind::NotEq)
            }
            (Some('/'), Some('/')) => {
                self.hint = Hint::Comment;
                Step::Changed
            }
            (Some(first), Some(_)) => {
                let kind = match first {
                    '=' => TokenKind::Eq,
                    '/' => TokenKind::Slash,
                    other => TokenKind::Unknown(other),
                };
                self.reseed(last);
                Step::Emit(kind)
            }
            (None, _) => Step::Stable,
        }
    }

    /// Flush runs that a trailing whitespace character cannot close.
    ///
    /// A comment on the last line has no newline to end it; an unterminated
    /// string literal is reported as a stray `"`.
    pub(crate) fn finish(&mut self) -> Option<TokenKind> {
        let kind = match self.hint {
            Hint::Comment => TokenKind::Comment(comment_body(&self.text).to_string()),
            Hint::Str => TokenKind::Unknown('"'),
            _ => return None,
        };
        self.reset();
        Some(kind)
    }
}

fn comment_body(text: &str) -> &str {
    text.strip_prefix("//").unwrap_or(text)
}

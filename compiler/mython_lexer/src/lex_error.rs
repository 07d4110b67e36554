//! Lexer error types.

use mython_ir::Span;
use std::fmt;

/// A lexer error: what went wrong and where.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// Location of the offending input.
    pub span: Span,
    /// What went wrong.
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Leading space count at a logical line start is not a multiple of two.
    OddIndent { width: usize },
    /// Missing closing quote for a string literal.
    UnterminatedString,
    /// Integer literal does not fit a signed 64-bit value.
    IntOverflow,
    /// A token-type assertion (`expect`) failed.
    WrongTokenKind { expected: &'static str },
    /// A token-value assertion (`expect` with a value) failed.
    WrongTokenValue { expected: &'static str },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::OddIndent { width } => {
                write!(f, "indent size must be even (found {width} spaces)")
            }
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::IntOverflow => write!(f, "number literal is too large"),
            LexErrorKind::WrongTokenKind { expected } => {
                write!(f, "token has different type from expected (wanted {expected})")
            }
            LexErrorKind::WrongTokenValue { expected } => {
                write!(f, "token has different value from expected (wanted {expected})")
            }
        }
    }
}

impl std::error::Error for LexError {}

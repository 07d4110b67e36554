//! Parser error types.

use mython_ir::Span;
use mython_lexer::LexError;
use std::fmt;

/// A parse error: what was expected and where.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub span: Span,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn expected(what: impl Into<String>, span: Span) -> Self {
        ParseError {
            span,
            kind: ParseErrorKind::Expected(what.into()),
        }
    }
}

/// What kind of parse error occurred.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// The lexer rejected the input.
    Lex(LexError),
    /// The token stream did not match the grammar.
    Expected(String),
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            span: err.span,
            kind: ParseErrorKind::Lex(err),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::Lex(err) => err.fmt(f),
            ParseErrorKind::Expected(what) => write!(f, "expected {what}"),
        }
    }
}

impl std::error::Error for ParseError {}

//! Token types for the Mython lexer.

use super::{Name, Span, StringInterner};
use std::fmt;

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Create a dummy token for tests.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds for Mython.
///
/// Identifier and string payloads are interned [`Name`]s, which keeps the
/// token 16 bytes and makes comparisons cheap. Punctuation the grammar has
/// no dedicated token for travels as `Char` — the parser matches on the
/// raw character.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Integer literal: 42
    Number(i64),
    /// Identifier (interned)
    Ident(Name),
    /// String literal (interned, escapes already processed)
    Str(Name),
    /// Any other printable character: `(`, `)`, `+`, `.`, ...
    Char(char),

    Class,
    Return,
    If,
    Else,
    Def,
    Print,
    And,
    Or,
    Not,
    None,
    True,
    False,

    /// End of a logical line.
    Newline,
    /// Indentation increased by one level (two spaces).
    Indent,
    /// Indentation decreased by one level.
    Dedent,
    /// End of input. Repeats forever once reached.
    Eof,

    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<=`
    LessOrEq,
    /// `>=`
    GreaterOrEq,
}

impl TokenKind {
    /// Check whether this token terminates a logical line.
    #[inline]
    pub fn is_line_end(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Eof)
    }

    /// Render the token for diagnostics and `mython lex` output.
    ///
    /// Value-carrying tokens print as `Kind{value}`, the rest print bare,
    /// matching the notation used in the lexer tests.
    pub fn display(&self, interner: &StringInterner) -> String {
        match self {
            TokenKind::Number(n) => format!("Number{{{n}}}"),
            TokenKind::Ident(name) => format!("Id{{{}}}", interner.lookup(*name)),
            TokenKind::Str(name) => format!("String{{{}}}", interner.lookup(*name)),
            TokenKind::Char(c) => format!("Char{{{c}}}"),
            TokenKind::Class => "Class".to_string(),
            TokenKind::Return => "Return".to_string(),
            TokenKind::If => "If".to_string(),
            TokenKind::Else => "Else".to_string(),
            TokenKind::Def => "Def".to_string(),
            TokenKind::Print => "Print".to_string(),
            TokenKind::And => "And".to_string(),
            TokenKind::Or => "Or".to_string(),
            TokenKind::Not => "Not".to_string(),
            TokenKind::None => "None".to_string(),
            TokenKind::True => "True".to_string(),
            TokenKind::False => "False".to_string(),
            TokenKind::Newline => "Newline".to_string(),
            TokenKind::Indent => "Indent".to_string(),
            TokenKind::Dedent => "Dedent".to_string(),
            TokenKind::Eof => "Eof".to_string(),
            TokenKind::Eq => "Eq".to_string(),
            TokenKind::NotEq => "NotEq".to_string(),
            TokenKind::LessOrEq => "LessOrEq".to_string(),
            TokenKind::GreaterOrEq => "GreaterOrEq".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_size() {
        // kind (16) + span (8), padded
        assert!(std::mem::size_of::<Token>() <= 24);
    }

    #[test]
    fn test_display() {
        let interner = StringInterner::new();
        let id = interner.intern("x");
        assert_eq!(TokenKind::Ident(id).display(&interner), "Id{x}");
        assert_eq!(TokenKind::Number(42).display(&interner), "Number{42}");
        assert_eq!(TokenKind::Dedent.display(&interner), "Dedent");
    }

    #[test]
    fn test_is_line_end() {
        assert!(TokenKind::Newline.is_line_end());
        assert!(TokenKind::Eof.is_line_end());
        assert!(!TokenKind::Indent.is_line_end());
    }
}

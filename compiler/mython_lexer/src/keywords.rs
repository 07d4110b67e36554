//! Keyword resolution.
//!
//! Identifiers are matched against the fixed keyword table after scanning.
//! The lookup buckets by length first: Mython keywords are 2-6 characters,
//! so most identifiers are rejected without a single string comparison.

use mython_ir::TokenKind;

/// Look up a keyword by text.
///
/// Returns the corresponding [`TokenKind`] if the text is a keyword,
/// `None` if it is a regular identifier.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    match text.len() {
        2 => match text {
            "if" => Some(TokenKind::If),
            "or" => Some(TokenKind::Or),
            _ => None,
        },
        3 => match text {
            "and" => Some(TokenKind::And),
            "def" => Some(TokenKind::Def),
            "not" => Some(TokenKind::Not),
            _ => None,
        },
        4 => match text {
            "else" => Some(TokenKind::Else),
            "None" => Some(TokenKind::None),
            "True" => Some(TokenKind::True),
            _ => None,
        },
        5 => match text {
            "class" => Some(TokenKind::Class),
            "print" => Some(TokenKind::Print),
            "False" => Some(TokenKind::False),
            _ => None,
        },
        6 => match text {
            "return" => Some(TokenKind::Return),
            _ => None,
        },
        _ => None,
    }
}

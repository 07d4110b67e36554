//! Lexer for Mython: a hand-written, indentation-aware pull lexer.
//!
//! The lexer turns a character stream into a token stream with explicit
//! `Indent`/`Dedent` tokens (off-side rule). It is *pull-based*: the
//! parser asks for one token at a time via [`Lexer::next_token`], and the
//! most recently produced token stays available through
//! [`Lexer::current`].
//!
//! # Indentation
//!
//! The indentation unit is two spaces. At each logical line start the
//! lexer counts leading spaces; an odd count is a lex error. A deeper
//! count than the stack top pushes a level and emits one `Indent`; a
//! shallower count pops **one** level per `next_token` call and emits one
//! `Dedent`, so closing several blocks takes several calls. All
//! outstanding dedents are flushed before the final `Eof`.
//!
//! # Blank lines and comments
//!
//! Blank lines and comment-only lines produce no tokens and do not affect
//! indentation. A comment after code runs to the end of the line; the
//! line's `Newline` token is still produced.
//!
//! # End of input
//!
//! If the last line has no trailing newline, a synthetic `Newline` is
//! emitted before `Eof`, so every non-empty program ends with a
//! terminating newline token. `Eof` repeats on every call afterwards.

mod cursor;
mod keywords;
mod lex_error;


use cursor::Cursor;
pub use lex_error::{LexError, LexErrorKind};
use mython_ir::{Name, Span, StringInterner, Token, TokenKind};

/// The pull lexer.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    /// Spaces counted at the current logical line start.
    current_indent: usize,
    /// Stack of accepted indent widths. Never empty; bottom is 0.
    indent_stack: Vec<usize>,
    /// Already-emitted tokens; the most recent is [`Lexer::current`].
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer and read the first token.
    pub fn new(source: &'a str, interner: &'a StringInterner) -> Result<Self, LexError> {
        let mut lexer = Lexer {
            cursor: Cursor::new(source),
            interner,
            current_indent: 0,
            indent_stack: vec![0],
            tokens: Vec::new(),
        };
        lexer.next_token()?;
        Ok(lexer)
    }

    /// The most recently produced token.
    ///
    /// Valid immediately after construction; once the input is exhausted
    /// this is `Eof`.
    #[inline]
    pub fn current(&self) -> &Token {
        // Non-empty: the constructor produced the first token.
        &self.tokens[self.tokens.len() - 1]
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_separators()?;

        let start = self.cursor.pos();
        let token = if self.current_indent != self.stack_top() {
            self.indent_or_dedent(start)
        } else {
            match self.cursor.current() {
                0 if self.cursor.is_eof() => self.eof_or_synthetic_newline(start),
                b'0'..=b'9' => self.number(start)?,
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
                b'\'' | b'"' => self.string(start)?,
                b'!' | b'<' | b'>' | b'=' => self.operator(start),
                b'\n' => {
                    self.cursor.advance();
                    Token::new(TokenKind::Newline, Span::new(start, self.cursor.pos()))
                }
                c => {
                    self.cursor.advance();
                    Token::new(
                        TokenKind::Char(c as char),
                        Span::new(start, self.cursor.pos()),
                    )
                }
            }
        };

        self.tokens.push(token);
        Ok(token)
    }

    /// Assert that the current token equals `kind` exactly.
    pub fn expect(&self, kind: TokenKind) -> Result<&Token, LexError> {
        let token = self.current();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(LexError::new(
                LexErrorKind::WrongTokenValue {
                    expected: kind_name(&kind),
                },
                token.span,
            ))
        }
    }

    /// Assert that the current token is an identifier and return its name.
    pub fn expect_ident(&self) -> Result<Name, LexError> {
        let token = self.current();
        match token.kind {
            TokenKind::Ident(name) => Ok(name),
            _ => Err(LexError::new(
                LexErrorKind::WrongTokenKind { expected: "Id" },
                token.span,
            )),
        }
    }

    /// Advance, then assert the new current token equals `kind`.
    pub fn expect_next(&mut self, kind: TokenKind) -> Result<Token, LexError> {
        self.next_token()?;
        self.expect(kind).map(|token| *token)
    }

    /// Advance, then assert the new current token is an identifier.
    pub fn expect_next_ident(&mut self) -> Result<Name, LexError> {
        self.next_token()?;
        self.expect_ident()
    }

    #[inline]
    fn stack_top(&self) -> usize {
        *self.indent_stack.last().unwrap_or(&0)
    }

    /// Skip spaces, comments, and blank lines; update the indent state.
    ///
    /// Blank and comment-only lines are consumed entirely, but only when
    /// positioned at a logical line start (just after a `Newline`, or
    /// before the first token). The indent width check and update also
    /// apply only at a logical line start, so the space run before a
    /// mid-line token never disturbs indentation.
    fn skip_separators(&mut self) -> Result<(), LexError> {
        let is_new_line = matches!(
            self.tokens.last(),
            Some(Token {
                kind: TokenKind::Newline,
                ..
            })
        );

        let mut space_count;
        loop {
            space_count = 0;
            while self.cursor.current() == b' ' {
                self.cursor.advance();
                space_count += 1;
            }

            if self.cursor.current() == b'#' {
                self.cursor.skip_to_line_end();
            }

            if self.cursor.current() == b'\n' && (self.tokens.is_empty() || is_new_line) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        if is_new_line {
            if space_count % 2 != 0 {
                return Err(LexError::new(
                    LexErrorKind::OddIndent { width: space_count },
                    Span::point(self.cursor.pos()),
                ));
            }
            if space_count != self.stack_top() {
                self.current_indent = space_count;
            }
        }
        Ok(())
    }

    /// Emit one `Indent` or `Dedent` step toward `current_indent`.
    ///
    /// Called while the target width differs from the stack top. A deeper
    /// target pushes once; a shallower target pops once — the caller's
    /// next `next_token` call re-enters here until the stack settles.
    fn indent_or_dedent(&mut self, start: u32) -> Token {
        let span = Span::point(start);
        if self.current_indent > self.stack_top() {
            self.indent_stack.push(self.current_indent);
            Token::new(TokenKind::Indent, span)
        } else {
            self.indent_stack.pop();
            Token::new(TokenKind::Dedent, span)
        }
    }

    /// EOF policy: synthesize a final `Newline` unless the last emitted
    /// token already terminates a line (or closes a block).
    fn eof_or_synthetic_newline(&self, start: u32) -> Token {
        let kind = match self.tokens.last().map(|t| t.kind) {
            None
            | Some(TokenKind::Newline)
            | Some(TokenKind::Dedent)
            | Some(TokenKind::Eof) => TokenKind::Eof,
            Some(_) => TokenKind::Newline,
        };
        Token::new(kind, Span::point(start))
    }

    fn number(&mut self, start: u32) -> Result<Token, LexError> {
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let end = self.cursor.pos();
        let text = self.cursor.slice(start, end);
        let value: i64 = text
            .parse()
            .map_err(|_| LexError::new(LexErrorKind::IntOverflow, Span::new(start, end)))?;
        Ok(Token::new(TokenKind::Number(value), Span::new(start, end)))
    }

    fn identifier(&mut self, start: u32) -> Token {
        self.cursor
            .eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let end = self.cursor.pos();
        let text = self.cursor.slice(start, end);
        let kind = match keywords::lookup(text) {
            Some(keyword) => keyword,
            None => TokenKind::Ident(self.interner.intern(text)),
        };
        Token::new(kind, Span::new(start, end))
    }

    /// Scan a string literal delimited by `'` or `"`.
    ///
    /// Escapes `\'`, `\"`, `\n`, `\t` are honored; any other `\x` yields
    /// a literal backslash followed by `x`.
    fn string(&mut self, start: u32) -> Result<Token, LexError> {
        let quote = self.cursor.current();
        self.cursor.advance();

        let mut content: Vec<u8> = Vec::new();
        loop {
            let byte = self.cursor.current();
            if byte == 0 && self.cursor.is_eof() {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedString,
                    Span::new(start, self.cursor.pos()),
                ));
            }
            if byte == quote {
                self.cursor.advance();
                break;
            }
            if byte == b'\\' {
                self.cursor.advance();
                let escaped = self.cursor.current();
                if escaped == 0 && self.cursor.is_eof() {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedString,
                        Span::new(start, self.cursor.pos()),
                    ));
                }
                match escaped {
                    b'\'' | b'"' => content.push(escaped),
                    b'n' => content.push(b'\n'),
                    b't' => content.push(b'\t'),
                    other => {
                        content.push(b'\\');
                        content.push(other);
                    }
                }
                self.cursor.advance();
            } else {
                content.push(byte);
                self.cursor.advance();
            }
        }

        // The source is valid UTF-8 and escapes only touch ASCII bytes,
        // so the copied bytes are valid UTF-8 as well.
        let text = String::from_utf8_lossy(&content).into_owned();
        let name = self.interner.intern_owned(text);
        Ok(Token::new(
            TokenKind::Str(name),
            Span::new(start, self.cursor.pos()),
        ))
    }

    /// `!`, `<`, `>`, `=`: combined with a following `=` into a
    /// two-character operator token, otherwise emitted as `Char`.
    fn operator(&mut self, start: u32) -> Token {
        let first = self.cursor.current();
        self.cursor.advance();
        let kind = if self.cursor.current() == b'=' {
            self.cursor.advance();
            match first {
                b'=' => TokenKind::Eq,
                b'!' => TokenKind::NotEq,
                b'<' => TokenKind::LessOrEq,
                _ => TokenKind::GreaterOrEq,
            }
        } else {
            TokenKind::Char(first as char)
        };
        Token::new(kind, Span::new(start, self.cursor.pos()))
    }
}

/// Lex an entire source into a token vector, ending with `Eof`.
///
/// Convenience entry point for `mython lex` and for tests; the parser
/// drives a [`Lexer`] incrementally instead.
pub fn lex_all(source: &str, interner: &StringInterner) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source, interner)?;
    let mut tokens = vec![*lexer.current()];
    while tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
        tokens.push(lexer.next_token()?);
    }
    Ok(tokens)
}

fn kind_name(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::Number(_) => "Number",
        TokenKind::Ident(_) => "Id",
        TokenKind::Str(_) => "String",
        TokenKind::Char(_) => "Char",
        TokenKind::Class => "Class",
        TokenKind::Return => "Return",
        TokenKind::If => "If",
        TokenKind::Else => "Else",
        TokenKind::Def => "Def",
        TokenKind::Print => "Print",
        TokenKind::And => "And",
        TokenKind::Or => "Or",
        TokenKind::Not => "Not",
        TokenKind::None => "None",
        TokenKind::True => "True",
        TokenKind::False => "False",
        TokenKind::Newline => "Newline",
        TokenKind::Indent => "Indent",
        TokenKind::Dedent => "Dedent",
        TokenKind::Eof => "Eof",
        TokenKind::Eq => "Eq",
        TokenKind::NotEq => "NotEq",
        TokenKind::LessOrEq => "LessOrEq",
        TokenKind::GreaterOrEq => "GreaterOrEq",
    }
}

//! Recursive-descent parser for Mython.
//!
//! The parser drives the lexer's pull interface one token at a time and
//! assembles arena-allocated AST nodes. Blocks are delimited by the
//! lexer's `Indent`/`Dedent` tokens; the parser calls `next_token` until
//! indentation is resolved, which falls out naturally from treating
//! `Dedent` as a block terminator.
//!
//! Grammar notes:
//!
//! - Dotted chains fold into a single `Variable` path; a trailing
//!   `.name(args)` peels the last segment off into a `MethodCall`.
//! - `str(x)` is the stringify operation, not a call.
//! - Any other `name(args)` parses as a `Call`, resolved against the
//!   class/function registry at run time.
//! - `pass` is accepted as a no-op statement (it is an ordinary
//!   identifier to the lexer).

mod error;

pub use error::{ParseError, ParseErrorKind};

use mython_ir::{
    Arena, BinaryOp, CompareOp, Expr, ExprId, ExprKind, ExprRange, MethodDecl, Module, Name,
    NameRange, Span, Stmt, StmtId, StmtKind, StmtRange, StringInterner, Token, TokenKind,
};
use mython_lexer::Lexer;
use tracing::debug;

/// Parse a whole source file into a [`Module`].
pub fn parse(source: &str, interner: &StringInterner) -> Result<Module, ParseError> {
    let lexer = Lexer::new(source, interner)?;
    let mut parser = Parser {
        lexer,
        arena: Arena::new(),
        str_name: interner.intern("str"),
        pass_name: interner.intern("pass"),
    };
    let body = parser.module_body()?;
    debug!(
        statements = parser.arena.stmt_count(),
        expressions = parser.arena.expr_count(),
        "parsed module"
    );
    Ok(Module {
        arena: parser.arena,
        body,
    })
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    arena: Arena,
    /// Pre-interned `str`, recognized as the stringify operation.
    str_name: Name,
    /// Pre-interned `pass`, recognized as a no-op statement.
    pass_name: Name,
}

impl<'a> Parser<'a> {
    // ---- token plumbing ----

    #[inline]
    fn current(&self) -> Token {
        *self.lexer.current()
    }

    #[inline]
    fn advance(&mut self) -> Result<Token, ParseError> {
        Ok(self.lexer.next_token()?)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn check_char(&self, c: char) -> bool {
        self.current().kind == TokenKind::Char(c)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(())
        } else {
            Err(ParseError::expected(what, self.current().span))
        }
    }

    fn expect_char(&mut self, c: char) -> Result<(), ParseError> {
        self.expect(TokenKind::Char(c), &format!("`{c}`"))
    }

    fn expect_ident(&mut self, what: &str) -> Result<(Name, Span), ParseError> {
        match self.current().kind {
            TokenKind::Ident(name) => {
                let span = self.current().span;
                self.advance()?;
                Ok((name, span))
            }
            _ => Err(ParseError::expected(what, self.current().span)),
        }
    }

    /// Consume the logical line terminator. `Eof` is accepted so the
    /// final line of a file needs no trailing newline.
    fn expect_newline(&mut self) -> Result<(), ParseError> {
        match self.current().kind {
            TokenKind::Newline => {
                self.advance()?;
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(ParseError::expected("end of line", self.current().span)),
        }
    }

    fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.arena.alloc_stmt(Stmt::new(kind, span))
    }

    fn expr_span(&self, id: ExprId) -> Span {
        self.arena.expr(id).span
    }

    // ---- statements ----

    fn module_body(&mut self) -> Result<StmtRange, ParseError> {
        let mut stmts = Vec::new();
        while !self.check(TokenKind::Eof) {
            if let Some(stmt) = self.statement()? {
                stmts.push(stmt);
            }
        }
        Ok(self.arena.alloc_stmt_list(stmts))
    }

    /// Parse one statement. Returns `None` for `pass`.
    fn statement(&mut self) -> Result<Option<StmtId>, ParseError> {
        match self.current().kind {
            TokenKind::Class => self.class_def().map(Some),
            TokenKind::Def => self.func_def().map(Some),
            TokenKind::If => self.if_stmt().map(Some),
            TokenKind::Print => self.print_stmt().map(Some),
            TokenKind::Return => self.return_stmt().map(Some),
            TokenKind::Ident(name) if name == self.pass_name => {
                self.advance()?;
                self.expect_newline()?;
                Ok(None)
            }
            _ => self.simple_stmt().map(Some),
        }
    }

    fn class_def(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current().span;
        self.advance()?; // class
        let (name, _) = self.expect_ident("a class name")?;

        let parent = if self.check_char('(') {
            self.advance()?;
            let (parent, _) = self.expect_ident("a base class name")?;
            self.expect_char(')')?;
            Some(parent)
        } else {
            None
        };

        self.expect_char(':')?;
        self.expect_newline()?;
        self.expect(TokenKind::Indent, "an indented class body")?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::Dedent) {
            match self.current().kind {
                TokenKind::Def => methods.push(self.method_decl()?),
                TokenKind::Ident(id) if id == self.pass_name => {
                    self.advance()?;
                    self.expect_newline()?;
                }
                _ => {
                    return Err(ParseError::expected(
                        "`def` or `pass` in class body",
                        self.current().span,
                    ))
                }
            }
        }
        self.advance()?; // dedent

        let methods = self.arena.alloc_methods(methods);
        Ok(self.alloc_stmt(
            StmtKind::ClassDef {
                name,
                parent,
                methods,
            },
            start,
        ))
    }

    fn method_decl(&mut self) -> Result<MethodDecl, ParseError> {
        let start = self.current().span;
        self.advance()?; // def
        let (name, _) = self.expect_ident("a method name")?;
        let params = self.param_list()?;
        self.expect_char(':')?;
        let body = self.suite()?;
        Ok(MethodDecl {
            name,
            params,
            body,
            span: start,
        })
    }

    fn func_def(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current().span;
        self.advance()?; // def
        let (name, _) = self.expect_ident("a function name")?;
        let params = self.param_list()?;
        self.expect_char(':')?;
        let body = self.suite()?;
        Ok(self.alloc_stmt(StmtKind::FuncDef { name, params, body }, start))
    }

    fn param_list(&mut self) -> Result<NameRange, ParseError> {
        self.expect_char('(')?;
        let mut params = Vec::new();
        if !self.check_char(')') {
            loop {
                let (param, _) = self.expect_ident("a parameter name")?;
                params.push(param);
                if !self.check_char(',') {
                    break;
                }
                self.advance()?;
            }
        }
        self.expect_char(')')?;
        Ok(self.arena.alloc_name_list(params))
    }

    /// An indented block: newline, `Indent`, statements, `Dedent`.
    fn suite(&mut self) -> Result<StmtRange, ParseError> {
        self.expect_newline()?;
        self.expect(TokenKind::Indent, "an indented block")?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::Dedent) {
            if self.check(TokenKind::Eof) {
                return Err(ParseError::expected("a statement", self.current().span));
            }
            if let Some(stmt) = self.statement()? {
                stmts.push(stmt);
            }
        }
        self.advance()?; // dedent
        Ok(self.arena.alloc_stmt_list(stmts))
    }

    fn if_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current().span;
        self.advance()?; // if
        let cond = self.expr()?;
        self.expect_char(':')?;
        let then_body = self.suite()?;

        let else_body = if self.check(TokenKind::Else) {
            self.advance()?;
            self.expect_char(':')?;
            Some(self.suite()?)
        } else {
            None
        };

        Ok(self.alloc_stmt(
            StmtKind::If {
                cond,
                then_body,
                else_body,
            },
            start,
        ))
    }

    fn print_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current().span;
        self.advance()?; // print
        let mut args = Vec::new();
        if !self.current().kind.is_line_end() {
            loop {
                args.push(self.expr()?);
                if !self.check_char(',') {
                    break;
                }
                self.advance()?;
            }
        }
        self.expect_newline()?;
        let args = self.arena.alloc_expr_list(args);
        Ok(self.alloc_stmt(StmtKind::Print(args), start))
    }

    fn return_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current().span;
        self.advance()?; // return
        let value = self.expr()?;
        self.expect_newline()?;
        Ok(self.alloc_stmt(StmtKind::Return(value), start))
    }

    /// Assignment, field assignment, or expression statement.
    fn simple_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current().span;
        let expr = self.expr()?;

        if self.check_char('=') {
            self.advance()?;
            let value = self.expr()?;
            self.expect_newline()?;

            let kind = match self.arena.expr(expr).kind {
                ExprKind::Variable(path) if path.len() == 1 => StmtKind::Assign {
                    name: self.arena.name_list(path)[0],
                    value,
                },
                ExprKind::Variable(path) => {
                    let names = self.arena.name_list(path);
                    let field = names[names.len() - 1];
                    let object = NameRange::new(path.start, path.len - 1);
                    StmtKind::FieldAssign {
                        object,
                        field,
                        value,
                    }
                }
                _ => return Err(ParseError::expected("an assignment target", start)),
            };
            return Ok(self.alloc_stmt(kind, start));
        }

        self.expect_newline()?;
        Ok(self.alloc_stmt(StmtKind::Expr(expr), start))
    }

    // ---- expressions ----

    fn expr(&mut self) -> Result<ExprId, ParseError> {
        self.or_test()
    }

    fn or_test(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.and_test()?;
        while self.check(TokenKind::Or) {
            self.advance()?;
            let right = self.and_test()?;
            let span = self.expr_span(left).merge(self.expr_span(right));
            left = self.alloc_expr(
                ExprKind::Binary {
                    op: BinaryOp::Or,
                    left,
                    right,
                },
                span,
            );
        }
        Ok(left)
    }

    fn and_test(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.not_test()?;
        while self.check(TokenKind::And) {
            self.advance()?;
            let right = self.not_test()?;
            let span = self.expr_span(left).merge(self.expr_span(right));
            left = self.alloc_expr(
                ExprKind::Binary {
                    op: BinaryOp::And,
                    left,
                    right,
                },
                span,
            );
        }
        Ok(left)
    }

    fn not_test(&mut self) -> Result<ExprId, ParseError> {
        if self.check(TokenKind::Not) {
            let start = self.current().span;
            self.advance()?;
            let operand = self.not_test()?;
            let span = start.merge(self.expr_span(operand));
            return Ok(self.alloc_expr(ExprKind::Not(operand), span));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<ExprId, ParseError> {
        let left = self.sum()?;
        let op = match self.current().kind {
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::NotEq => CompareOp::NotEq,
            TokenKind::LessOrEq => CompareOp::LtEq,
            TokenKind::GreaterOrEq => CompareOp::GtEq,
            TokenKind::Char('<') => CompareOp::Lt,
            TokenKind::Char('>') => CompareOp::Gt,
            _ => return Ok(left),
        };
        self.advance()?;
        let right = self.sum()?;
        let span = self.expr_span(left).merge(self.expr_span(right));
        Ok(self.alloc_expr(ExprKind::Compare { op, left, right }, span))
    }

    fn sum(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.term()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Char('+') => BinaryOp::Add,
                TokenKind::Char('-') => BinaryOp::Sub,
                _ => break,
            };
            self.advance()?;
            let right = self.term()?;
            let span = self.expr_span(left).merge(self.expr_span(right));
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.postfix()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Char('*') => BinaryOp::Mul,
                TokenKind::Char('/') => BinaryOp::Div,
                _ => break,
            };
            self.advance()?;
            let right = self.postfix()?;
            let span = self.expr_span(left).merge(self.expr_span(right));
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    /// A primary expression with its method-call trailers.
    ///
    /// Identifier-led forms fold into either a dotted `Variable` path, a
    /// `Call`, or a `MethodCall` whose receiver is the path parsed so
    /// far. `str(...)` is recognized here as the stringify operation.
    fn postfix(&mut self) -> Result<ExprId, ParseError> {
        if let TokenKind::Ident(first) = self.current().kind {
            let first_span = self.current().span;
            self.advance()?;

            if self.check_char('(') {
                let expr = if first == self.str_name {
                    self.advance()?; // '('
                    let arg = self.expr()?;
                    self.expect_char(')')?;
                    let span = first_span.merge(self.expr_span(arg));
                    self.alloc_expr(ExprKind::Stringify(arg), span)
                } else {
                    let args = self.call_args()?;
                    self.alloc_expr(ExprKind::Call { name: first, args }, first_span)
                };
                return self.trailers(expr);
            }

            // Dotted path: id (. id)*, possibly ending in `.name(args)`.
            let mut path = vec![first];
            let mut span = first_span;
            while self.check_char('.') {
                self.advance()?;
                let (id, id_span) = self.expect_ident("a field or method name")?;
                if self.check_char('(') {
                    let receiver_range = self.arena.alloc_name_list(path);
                    let receiver = self.alloc_expr(ExprKind::Variable(receiver_range), span);
                    let args = self.call_args()?;
                    let call = self.alloc_expr(
                        ExprKind::MethodCall {
                            receiver,
                            method: id,
                            args,
                        },
                        span.merge(id_span),
                    );
                    return self.trailers(call);
                }
                path.push(id);
                span = span.merge(id_span);
            }
            let range = self.arena.alloc_name_list(path);
            return Ok(self.alloc_expr(ExprKind::Variable(range), span));
        }

        let primary = self.primary()?;
        self.trailers(primary)
    }

    /// Method-call trailers on an arbitrary receiver expression, e.g.
    /// `C().greet()`. Bare field reads are only available on dotted
    /// paths, so a trailer must be a call.
    fn trailers(&mut self, mut expr: ExprId) -> Result<ExprId, ParseError> {
        while self.check_char('.') {
            self.advance()?;
            let (method, method_span) = self.expect_ident("a method name")?;
            if !self.check_char('(') {
                return Err(ParseError::expected(
                    "`(` to call a method",
                    self.current().span,
                ));
            }
            let args = self.call_args()?;
            let span = self.expr_span(expr).merge(method_span);
            expr = self.alloc_expr(
                ExprKind::MethodCall {
                    receiver: expr,
                    method,
                    args,
                },
                span,
            );
        }
        Ok(expr)
    }

    fn call_args(&mut self) -> Result<ExprRange, ParseError> {
        self.expect_char('(')?;
        let mut args = Vec::new();
        if !self.check_char(')') {
            loop {
                args.push(self.expr()?);
                if !self.check_char(',') {
                    break;
                }
                self.advance()?;
            }
        }
        self.expect_char(')')?;
        Ok(self.arena.alloc_expr_list(args))
    }

    fn primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.current();
        match token.kind {
            TokenKind::Number(n) => {
                self.advance()?;
                Ok(self.alloc_expr(ExprKind::Number(n), token.span))
            }
            TokenKind::Str(s) => {
                self.advance()?;
                Ok(self.alloc_expr(ExprKind::Str(s), token.span))
            }
            TokenKind::True => {
                self.advance()?;
                Ok(self.alloc_expr(ExprKind::Bool(true), token.span))
            }
            TokenKind::False => {
                self.advance()?;
                Ok(self.alloc_expr(ExprKind::Bool(false), token.span))
            }
            TokenKind::None => {
                self.advance()?;
                Ok(self.alloc_expr(ExprKind::None, token.span))
            }
            TokenKind::Char('(') => {
                self.advance()?;
                let expr = self.expr()?;
                self.expect_char(')')?;
                Ok(expr)
            }
            _ => Err(ParseError::expected("an expression", token.span)),
        }
    }
}

#[cfg(test)]
mod tests;

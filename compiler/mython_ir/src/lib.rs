//! Mython IR - shared data structures for the Mython interpreter.
//!
//! This crate holds everything the lexer, parser, and evaluator exchange:
//!
//! - [`Name`] / [`StringInterner`]: compact interned identifiers
//! - [`Span`]: byte-offset source locations
//! - [`Token`] / [`TokenKind`]: the lexer's output vocabulary
//! - [`Arena`] and the AST node types: flat, index-based statement and
//!   expression storage

mod arena;
mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use arena::Arena;
pub use ast::{
    BinaryOp, CompareOp, Expr, ExprId, ExprKind, ExprRange, MethodDecl, MethodRange, Module,
    NameRange, Stmt, StmtId, StmtKind, StmtRange,
};
pub use interner::StringInterner;
pub use name::Name;
pub use span::{line_col, Span};
pub use token::{Token, TokenKind};

//! Arena allocation for the flat AST.
//!
//! All statements and expressions of a module live in contiguous vectors;
//! nodes reference children through `u32` indices and `(start, len)`
//! ranges. Dropping the arena frees the whole tree at once.

use crate::ast::{
    Expr, ExprId, ExprRange, MethodDecl, MethodRange, NameRange, Stmt, StmtId, StmtRange,
};
use crate::Name;

/// Panic helper for capacity overflow (cold path, never inlined).
#[cold]
#[inline(never)]
fn panic_capacity_exceeded(value: usize, context: &str) -> ! {
    panic!("arena capacity exceeded: {context} has {value} elements")
}

/// Convert usize to u32, panicking with a clear message on overflow.
#[inline]
fn to_u32(value: usize, context: &str) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| panic_capacity_exceeded(value, context))
}

/// Convert usize to u16, panicking with a clear message on overflow.
#[inline]
fn to_u16(value: usize, context: &str) -> u16 {
    u16::try_from(value).unwrap_or_else(|_| panic_capacity_exceeded(value, context))
}

/// Contiguous storage for all AST nodes in a module.
#[derive(Default, Debug)]
pub struct Arena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// All statements (indexed by `StmtId`).
    stmts: Vec<Stmt>,
    /// Flattened expression lists (call arguments, print arguments).
    expr_lists: Vec<ExprId>,
    /// Flattened statement lists (blocks, method bodies).
    stmt_lists: Vec<StmtId>,
    /// Flattened name lists (dotted paths, parameter lists).
    name_lists: Vec<Name>,
    /// Method declarations, referenced by class definitions.
    methods: Vec<MethodDecl>,
}

impl Arena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its id.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(expr);
        id
    }

    /// Get an expression by id.
    #[inline]
    #[track_caller]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Allocate a statement, returning its id.
    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        self.stmts.push(stmt);
        id
    }

    /// Get a statement by id.
    #[inline]
    #[track_caller]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    /// Allocate an expression list, returning its range.
    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len(), "expression lists");
        self.expr_lists.extend(exprs);
        let len = to_u16(self.expr_lists.len() - start as usize, "expression list");
        ExprRange::new(start, len)
    }

    /// Get an expression list by range.
    #[inline]
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    /// Allocate a statement list, returning its range.
    pub fn alloc_stmt_list(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = to_u32(self.stmt_lists.len(), "statement lists");
        self.stmt_lists.extend(stmts);
        let len = to_u16(self.stmt_lists.len() - start as usize, "statement list");
        StmtRange::new(start, len)
    }

    /// Get a statement list by range.
    #[inline]
    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        let start = range.start as usize;
        &self.stmt_lists[start..start + range.len()]
    }

    /// Allocate a name list, returning its range.
    pub fn alloc_name_list(&mut self, names: impl IntoIterator<Item = Name>) -> NameRange {
        let start = to_u32(self.name_lists.len(), "name lists");
        self.name_lists.extend(names);
        let len = to_u16(self.name_lists.len() - start as usize, "name list");
        NameRange::new(start, len)
    }

    /// Get a name list by range.
    #[inline]
    pub fn name_list(&self, range: NameRange) -> &[Name] {
        let start = range.start as usize;
        &self.name_lists[start..start + range.len()]
    }

    /// Allocate a group of method declarations, returning its range.
    pub fn alloc_methods(&mut self, methods: impl IntoIterator<Item = MethodDecl>) -> MethodRange {
        let start = to_u32(self.methods.len(), "methods");
        self.methods.extend(methods);
        let len = to_u16(self.methods.len() - start as usize, "method list");
        MethodRange::new(start, len)
    }

    /// Get the method declarations for a range.
    #[inline]
    pub fn methods(&self, range: MethodRange) -> &[MethodDecl] {
        let start = range.start as usize;
        &self.methods[start..start + range.len()]
    }

    /// Total number of allocated expressions.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Total number of allocated statements.
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}

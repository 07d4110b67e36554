//! Statement and expression nodes for the Mython AST.
//!
//! All children are arena indices, not boxes: `ExprId` / `StmtId` index
//! into the [`Arena`](crate::Arena), and child lists are flattened ranges
//! into the arena's side tables. This keeps nodes `Copy` and evaluation
//! cache-friendly.

use std::fmt;

use crate::{Arena, Name, Span};

/// Index of an expression in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Index of a statement in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct StmtId(u32);

impl StmtId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        StmtId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtId({})", self.0)
    }
}

macro_rules! define_range {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub struct $name {
            pub start: u32,
            pub len: u16,
        }

        impl $name {
            pub const EMPTY: $name = $name { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u16) -> Self {
                $name { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }
        }
    };
}

define_range!(
    /// Range into the arena's flattened expression lists.
    ExprRange
);
define_range!(
    /// Range into the arena's flattened statement lists.
    StmtRange
);
define_range!(
    /// Range into the arena's flattened name lists (dotted paths, params).
    NameRange
);
define_range!(
    /// Range into the arena's method declarations.
    MethodRange
);

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Short-circuit: right operand untouched when the left is truthy.
    Or,
    /// Short-circuit: right operand untouched when the left is falsy.
    And,
}

/// Comparison operators.
///
/// Only `Eq` and `Lt` have primitive semantics of their own; the other
/// four are derived from them during evaluation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal: 42
    Number(i64),
    /// String literal (interned)
    Str(Name),
    /// Boolean literal: True, False
    Bool(bool),
    /// None literal
    None,

    /// Dotted variable access: `x`, `circle.center.x`.
    ///
    /// The range holds at least one name. Every name but the last must
    /// resolve to a class instance whose field table the next name is
    /// looked up in.
    Variable(NameRange),

    /// `str(x)` — the print representation of the argument as a string.
    Stringify(ExprId),

    /// `not x`
    Not(ExprId),

    /// Binary operation: left op right.
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// Comparison: left cmp right.
    Compare {
        op: CompareOp,
        left: ExprId,
        right: ExprId,
    },

    /// Call of a registered name: `Point(3, 4)` or `side()`.
    ///
    /// Resolved at run time: a class name constructs an instance, a
    /// top-level function name invokes that function.
    Call { name: Name, args: ExprRange },

    /// Method call: `receiver.method(args...)`.
    MethodCall {
        receiver: ExprId,
        method: Name,
        args: ExprRange,
    },
}

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Statement variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// `name = value`
    Assign { name: Name, value: ExprId },

    /// `object.path.field = value`
    ///
    /// `object` resolves like [`ExprKind::Variable`] and must produce a
    /// class instance; `field` is created in its field table on first
    /// assignment.
    FieldAssign {
        object: NameRange,
        field: Name,
        value: ExprId,
    },

    /// `print a, b, c` — arguments space-separated, newline-terminated.
    Print(ExprRange),

    /// Expression statement (a method call in statement position).
    Expr(ExprId),

    /// `if cond: ... [else: ...]`
    If {
        cond: ExprId,
        then_body: StmtRange,
        else_body: Option<StmtRange>,
    },

    /// `return expr` — unwinds to the nearest enclosing body boundary.
    Return(ExprId),

    /// `class Name[(Parent)]: ...` — registers the class and binds its
    /// name in the executing environment.
    ClassDef {
        name: Name,
        parent: Option<Name>,
        methods: MethodRange,
    },

    /// Top-level `def name(params): ...` — registers a free function.
    FuncDef {
        name: Name,
        params: NameRange,
        body: StmtRange,
    },
}

/// A method declaration inside a class body.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodDecl {
    pub name: Name,
    pub params: NameRange,
    pub body: StmtRange,
    pub span: Span,
}

/// A parsed program: the arena plus the top-level statement list.
#[derive(Debug)]
pub struct Module {
    pub arena: Arena,
    pub body: StmtRange,
}

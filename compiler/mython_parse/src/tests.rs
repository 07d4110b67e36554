use crate::{parse, ParseErrorKind};
use mython_ir::{BinaryOp, CompareOp, ExprKind, Module, StmtKind, StringInterner};

fn parse_ok(source: &str) -> (Module, StringInterner) {
    let interner = StringInterner::new();
    let module = parse(source, &interner).expect("parse should succeed");
    (module, interner)
}

fn parse_err(source: &str) -> crate::ParseError {
    let interner = StringInterner::new();
    parse(source, &interner).expect_err("parse should fail")
}

#[test]
fn test_empty_program() {
    let (module, _) = parse_ok("");
    assert!(module.arena.stmt_list(module.body).is_empty());
}

#[test]
fn test_assignment() {
    let (module, interner) = parse_ok("x = 42\n");
    let stmts = module.arena.stmt_list(module.body);
    assert_eq!(stmts.len(), 1);
    match module.arena.stmt(stmts[0]).kind {
        StmtKind::Assign { name, value } => {
            assert_eq!(name, interner.intern("x"));
            assert_eq!(module.arena.expr(value).kind, ExprKind::Number(42));
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_field_assignment_splits_path() {
    let (module, interner) = parse_ok("self.x = 1\n");
    let stmts = module.arena.stmt_list(module.body);
    match module.arena.stmt(stmts[0]).kind {
        StmtKind::FieldAssign { object, field, .. } => {
            assert_eq!(module.arena.name_list(object), &[interner.intern("self")]);
            assert_eq!(field, interner.intern("x"));
        }
        other => panic!("expected field assignment, got {other:?}"),
    }
}

#[test]
fn test_deep_field_assignment() {
    let (module, interner) = parse_ok("a.b.c = 1\n");
    let stmts = module.arena.stmt_list(module.body);
    match module.arena.stmt(stmts[0]).kind {
        StmtKind::FieldAssign { object, field, .. } => {
            assert_eq!(
                module.arena.name_list(object),
                &[interner.intern("a"), interner.intern("b")]
            );
            assert_eq!(field, interner.intern("c"));
        }
        other => panic!("expected field assignment, got {other:?}"),
    }
}

#[test]
fn test_dotted_variable_folds_into_one_path() {
    let (module, interner) = parse_ok("y = circle.center.x\n");
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::Assign { value, .. } = module.arena.stmt(stmts[0]).kind else {
        panic!("expected assignment");
    };
    match module.arena.expr(value).kind {
        ExprKind::Variable(path) => {
            assert_eq!(
                module.arena.name_list(path),
                &[
                    interner.intern("circle"),
                    interner.intern("center"),
                    interner.intern("x"),
                ]
            );
        }
        other => panic!("expected variable path, got {other:?}"),
    }
}

#[test]
fn test_method_call_peels_last_segment() {
    let (module, interner) = parse_ok("p.set_name('Ivan')\n");
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::Expr(expr) = module.arena.stmt(stmts[0]).kind else {
        panic!("expected expression statement");
    };
    match module.arena.expr(expr).kind {
        ExprKind::MethodCall {
            receiver,
            method,
            args,
        } => {
            assert_eq!(method, interner.intern("set_name"));
            assert_eq!(module.arena.expr_list(args).len(), 1);
            match module.arena.expr(receiver).kind {
                ExprKind::Variable(path) => {
                    assert_eq!(module.arena.name_list(path), &[interner.intern("p")]);
                }
                other => panic!("expected variable receiver, got {other:?}"),
            }
        }
        other => panic!("expected method call, got {other:?}"),
    }
}

#[test]
fn test_chained_call_on_construction() {
    let (module, interner) = parse_ok("print C().greet()\n");
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::Print(args) = module.arena.stmt(stmts[0]).kind else {
        panic!("expected print");
    };
    let arg = module.arena.expr_list(args)[0];
    match module.arena.expr(arg).kind {
        ExprKind::MethodCall {
            receiver, method, ..
        } => {
            assert_eq!(method, interner.intern("greet"));
            assert!(matches!(
                module.arena.expr(receiver).kind,
                ExprKind::Call { .. }
            ));
        }
        other => panic!("expected method call, got {other:?}"),
    }
}

#[test]
fn test_str_is_stringify() {
    let (module, _) = parse_ok("x = str(5)\n");
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::Assign { value, .. } = module.arena.stmt(stmts[0]).kind else {
        panic!("expected assignment");
    };
    assert!(matches!(
        module.arena.expr(value).kind,
        ExprKind::Stringify(_)
    ));
}

#[test]
fn test_precedence_mul_before_add() {
    // 1 + 2 * 3 parses as 1 + (2 * 3)
    let (module, _) = parse_ok("x = 1 + 2 * 3\n");
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::Assign { value, .. } = module.arena.stmt(stmts[0]).kind else {
        panic!("expected assignment");
    };
    let ExprKind::Binary { op, left, right } = module.arena.expr(value).kind else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(module.arena.expr(left).kind, ExprKind::Number(1));
    assert!(matches!(
        module.arena.expr(right).kind,
        ExprKind::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn test_precedence_comparison_over_logic() {
    // a == 1 and b parses as (a == 1) and b
    let (module, _) = parse_ok("x = a == 1 and b\n");
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::Assign { value, .. } = module.arena.stmt(stmts[0]).kind else {
        panic!("expected assignment");
    };
    let ExprKind::Binary { op, left, .. } = module.arena.expr(value).kind else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::And);
    assert!(matches!(
        module.arena.expr(left).kind,
        ExprKind::Compare {
            op: CompareOp::Eq,
            ..
        }
    ));
}

#[test]
fn test_grouping_overrides_precedence() {
    let (module, _) = parse_ok("x = (1 + 2) * 3\n");
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::Assign { value, .. } = module.arena.stmt(stmts[0]).kind else {
        panic!("expected assignment");
    };
    let ExprKind::Binary { op, left, .. } = module.arena.expr(value).kind else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(
        module.arena.expr(left).kind,
        ExprKind::Binary {
            op: BinaryOp::Add,
            ..
        }
    ));
}

#[test]
fn test_class_with_methods() {
    let source = "\
class Point:
  def __init__(x, y):
    self.x = x
    self.y = y
  def norm():
    return self.x * self.x + self.y * self.y
";
    let (module, interner) = parse_ok(source);
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::ClassDef {
        name,
        parent,
        methods,
    } = module.arena.stmt(stmts[0]).kind
    else {
        panic!("expected class definition");
    };
    assert_eq!(name, interner.intern("Point"));
    assert_eq!(parent, None);
    let decls = module.arena.methods(methods);
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[0].name, interner.intern("__init__"));
    assert_eq!(module.arena.name_list(decls[0].params).len(), 2);
    assert_eq!(decls[1].name, interner.intern("norm"));
    assert!(module.arena.name_list(decls[1].params).is_empty());
}

#[test]
fn test_class_with_parent_and_pass() {
    let source = "\
class A:
  def greet():
    return 'A'
class C(A):
  pass
";
    let (module, interner) = parse_ok(source);
    let stmts = module.arena.stmt_list(module.body);
    assert_eq!(stmts.len(), 2);
    let StmtKind::ClassDef {
        name,
        parent,
        methods,
    } = module.arena.stmt(stmts[1]).kind
    else {
        panic!("expected class definition");
    };
    assert_eq!(name, interner.intern("C"));
    assert_eq!(parent, Some(interner.intern("A")));
    assert!(module.arena.methods(methods).is_empty());
}

#[test]
fn test_top_level_def() {
    let source = "\
def side():
  print 'SIDE'
  return True
";
    let (module, interner) = parse_ok(source);
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::FuncDef { name, params, body } = module.arena.stmt(stmts[0]).kind else {
        panic!("expected function definition");
    };
    assert_eq!(name, interner.intern("side"));
    assert!(module.arena.name_list(params).is_empty());
    assert_eq!(module.arena.stmt_list(body).len(), 2);
}

#[test]
fn test_if_else() {
    let source = "\
if x > 0:
  print 'pos'
else:
  print 'neg'
";
    let (module, _) = parse_ok(source);
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::If {
        then_body,
        else_body,
        ..
    } = module.arena.stmt(stmts[0]).kind
    else {
        panic!("expected if");
    };
    assert_eq!(module.arena.stmt_list(then_body).len(), 1);
    assert_eq!(module.arena.stmt_list(else_body.unwrap()).len(), 1);
}

#[test]
fn test_nested_if() {
    let source = "\
if a:
  if b:
    x = 1
  y = 2
z = 3
";
    let (module, _) = parse_ok(source);
    let stmts = module.arena.stmt_list(module.body);
    assert_eq!(stmts.len(), 2);
    let StmtKind::If { then_body, .. } = module.arena.stmt(stmts[0]).kind else {
        panic!("expected if");
    };
    // Inner if plus y = 2.
    assert_eq!(module.arena.stmt_list(then_body).len(), 2);
}

#[test]
fn test_print_with_multiple_args() {
    let (module, _) = parse_ok("print 1, 'two', x\n");
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::Print(args) = module.arena.stmt(stmts[0]).kind else {
        panic!("expected print");
    };
    assert_eq!(module.arena.expr_list(args).len(), 3);
}

#[test]
fn test_print_no_args() {
    let (module, _) = parse_ok("print\n");
    let stmts = module.arena.stmt_list(module.body);
    let StmtKind::Print(args) = module.arena.stmt(stmts[0]).kind else {
        panic!("expected print");
    };
    assert!(module.arena.expr_list(args).is_empty());
}

#[test]
fn test_missing_block_is_error() {
    let err = parse_err("if x:\nprint 1\n");
    assert!(matches!(err.kind, ParseErrorKind::Expected(_)));
}

#[test]
fn test_stray_expression_in_class_body_is_error() {
    let err = parse_err("class A:\n  x = 1\n");
    assert!(matches!(err.kind, ParseErrorKind::Expected(_)));
}

#[test]
fn test_lex_error_propagates() {
    let err = parse_err("x = 'unterminated\n");
    assert!(matches!(err.kind, ParseErrorKind::Lex(_)));
}

#[test]
fn test_assignment_to_literal_is_error() {
    let err = parse_err("1 = 2\n");
    assert!(matches!(err.kind, ParseErrorKind::Expected(_)));
}

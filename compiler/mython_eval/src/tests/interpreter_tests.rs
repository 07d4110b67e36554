use super::{run, run_env, run_err};
use crate::Value;

// Arithmetic and printing

#[test]
fn test_arithmetic_and_print() {
    let source = "\
x = 4
y = 5
print x + y, x * y, y - x, y / x
";
    assert_eq!(run(source), "9 20 1 1\n");
}

#[test]
fn test_print_empty_line() {
    assert_eq!(run("print\n"), "\n");
}

#[test]
fn test_print_none_literal() {
    assert_eq!(run("print None\n"), "None\n");
}

#[test]
fn test_print_booleans() {
    assert_eq!(run("print True, False\n"), "True False\n");
}

#[test]
fn test_print_string_raw() {
    assert_eq!(run("print 'no quotes'\n"), "no quotes\n");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(run("print 'ab' + 'cd'\n"), "abcd\n");
}

#[test]
fn test_division_truncates() {
    assert_eq!(run("print 7 / 2\n"), "3\n");
}

#[test]
fn test_stringify() {
    assert_eq!(run("print str(42) + '!'\n"), "42!\n");
    assert_eq!(run("print str(None)\n"), "None\n");
    assert_eq!(run("print str(True) + str(False)\n"), "TrueFalse\n");
}

#[test]
fn test_variable_shadowing() {
    let source = "\
x = 1
x = 'two'
print x
";
    assert_eq!(run(source), "two\n");
}

// Classes, instances, methods

#[test]
fn test_class_with_init_and_str() {
    let source = "\
class Point:
  def __init__(x, y):
    self.x = x
    self.y = y
  def __str__():
    return str(self.x) + ',' + str(self.y)
p = Point(3, 4)
print p
";
    assert_eq!(run(source), "3,4\n");
}

#[test]
fn test_instance_without_str_prints_placeholder() {
    let source = "\
class Empty:
  pass
print Empty()
";
    assert_eq!(run(source), "<Empty object>\n");
}

#[test]
fn test_class_value_prints_with_name() {
    let source = "\
class Point:
  pass
print Point
";
    assert_eq!(run(source), "Class Point\n");
}

#[test]
fn test_init_skipped_on_arity_mismatch() {
    // No __init__ taking zero args: the instance is created with an
    // empty field table and set_name fills it in later.
    let source = "\
class Person:
  def set_name(name):
    self.name = name
  def __str__():
    return self.name
p = Person()
p.set_name('Ivan')
print p
";
    assert_eq!(run(source), "Ivan\n");
}

#[test]
fn test_constructor_args_unevaluated_without_init() {
    // No matching __init__ means the argument expressions never run.
    let source = "\
class Quiet:
  pass
q = Quiet(1 / 0)
print 'ok'
";
    assert_eq!(run(source), "ok\n");
}

#[test]
fn test_inheritance_and_override() {
    let source = "\
class A:
  def greet():
    return 'A'
class B(A):
  def greet():
    return 'B'
class C(B):
  pass
print C().greet()
";
    assert_eq!(run(source), "B\n");
}

#[test]
fn test_inherited_method_from_grandparent() {
    let source = "\
class A:
  def name():
    return 'A'
class B(A):
  pass
class C(B):
  pass
print C().name()
";
    assert_eq!(run(source), "A\n");
}

#[test]
fn test_method_sees_self_fields() {
    let source = "\
class Counter:
  def __init__():
    self.count = 0
  def bump():
    self.count = self.count + 1
    return self.count
c = Counter()
c.bump()
c.bump()
print c.bump()
";
    assert_eq!(run(source), "3\n");
}

#[test]
fn test_aliased_instances_share_fields() {
    let source = "\
class Box:
  def __init__():
    self.value = 1
a = Box()
b = a
b.value = 99
print a.value
";
    assert_eq!(run(source), "99\n");
}

#[test]
fn test_dotted_chain_access() {
    let source = "\
class Point:
  def __init__(x):
    self.x = x
class Circle:
  def __init__(center):
    self.center = center
c = Circle(Point(7))
print c.center.x
";
    assert_eq!(run(source), "7\n");
}

#[test]
fn test_method_recursion() {
    let source = "\
class Math:
  def fact(n):
    if n < 2:
      return 1
    return n * self.fact(n - 1)
m = Math()
print m.fact(5)
";
    assert_eq!(run(source), "120\n");
}

#[test]
fn test_add_dunder() {
    let source = "\
class Vec:
  def __init__(x):
    self.x = x
  def __add__(other):
    return Vec(self.x + other.x)
  def __str__():
    return str(self.x)
print Vec(2) + Vec(3)
";
    assert_eq!(run(source), "5\n");
}

#[test]
fn test_eq_and_lt_dunders() {
    let source = "\
class Num:
  def __init__(v):
    self.v = v
  def __eq__(other):
    return self.v == other.v
  def __lt__(other):
    return self.v < other.v
a = Num(1)
b = Num(2)
print a == b, a < b, a != b, a <= b, a > b, a >= b
";
    assert_eq!(run(source), "False True True True False False\n");
}

// Top-level functions

#[test]
fn test_short_circuit_with_side_effect() {
    let source = "\
def side():
  print 'SIDE'
  return True
print 1 and 0 or side()
";
    assert_eq!(run(source), "SIDE\nTrue\n");
}

#[test]
fn test_short_circuit_purity() {
    // The right operand must not run when the left decides the result.
    let source = "\
def side():
  print 'SIDE'
  return True
x = 0 and side()
y = 1 or side()
print x, y
";
    assert_eq!(run(source), "False True\n");
}

#[test]
fn test_function_returns_value() {
    let source = "\
def add(a, b):
  return a + b
print add(2, 3)
";
    assert_eq!(run(source), "5\n");
}

#[test]
fn test_function_without_return_yields_none() {
    let source = "\
def noop():
  x = 1
print noop()
";
    assert_eq!(run(source), "None\n");
}

#[test]
fn test_function_cannot_see_globals() {
    let source = "\
x = 5
def f():
  return x
print f()
";
    let (_, err) = run_err(source);
    assert_eq!(err.to_string(), "variable x not found");
}

// Return unwinding

#[test]
fn test_return_inside_nested_if() {
    let source = "\
class R:
  def f(n):
    if n > 0:
      if n > 5:
        return 'big'
      return 'small'
    return 'zero'
r = R()
print r.f(10), r.f(3), r.f(0)
";
    assert_eq!(run(source), "big small zero\n");
}

#[test]
fn test_return_skips_rest_of_body() {
    let source = "\
def f():
  return 1
  print 'unreachable'
print f()
";
    assert_eq!(run(source), "1\n");
}

#[test]
fn test_return_at_top_level_is_error() {
    let (_, err) = run_err("return 5\n");
    assert_eq!(err.to_string(), "return outside of a function body");
}

// Truthiness and logic

#[test]
fn test_truthiness_in_conditions() {
    let source = "\
if 0:
  print 'no'
if '':
  print 'no'
if None:
  print 'no'
if 3:
  print 'int'
if 'x':
  print 'str'
if not None:
  print 'not-none'
";
    assert_eq!(run(source), "int\nstr\nnot-none\n");
}

#[test]
fn test_instances_are_falsy() {
    let source = "\
class T:
  pass
if T():
  print 'no'
print not T()
";
    assert_eq!(run(source), "True\n");
}

#[test]
fn test_and_or_produce_booleans() {
    assert_eq!(run("print 2 and 3, 0 or 5\n"), "True True\n");
}

#[test]
fn test_none_equality() {
    assert_eq!(run("print None == None, None != None\n"), "True False\n");
}

#[test]
fn test_primitive_comparisons() {
    assert_eq!(
        run("print 1 < 2, 'a' < 'b', 2 <= 2, 3 > 1, 3 >= 4, 'x' == 'x'\n"),
        "True True True True False True\n"
    );
}

// Error surface

#[test]
fn test_undefined_variable() {
    let (_, err) = run_err("print missing\n");
    assert_eq!(err.to_string(), "variable missing not found");
}

#[test]
fn test_division_by_zero_keeps_prior_output() {
    let source = "\
print 'before'
print 1 / 0
";
    let (output, err) = run_err(source);
    assert_eq!(output, "before\n");
    assert_eq!(err.to_string(), "try to divide to zero");
}

#[test]
fn test_failing_print_emits_nothing_for_that_statement() {
    // The failing argument aborts the whole print statement; nothing of
    // it reaches the stream.
    let source = "\
print 'kept'
print 'lost', 1 / 0
";
    let (output, err) = run_err(source);
    assert_eq!(output, "kept\n");
    assert_eq!(err.to_string(), "try to divide to zero");
}

#[test]
fn test_method_call_on_non_instance() {
    let (_, err) = run_err("x = 1\nx.f()\n");
    assert_eq!(err.to_string(), "not a class instance");
}

#[test]
fn test_method_call_with_wrong_arity() {
    let source = "\
class A:
  def f(a):
    return a
A().f()
";
    let (_, err) = run_err(source);
    assert_eq!(err.to_string(), "not a class instance");
}

#[test]
fn test_unknown_call_target() {
    let (_, err) = run_err("x = Missing()\n");
    assert_eq!(err.to_string(), "Missing is not a class or function name");
}

#[test]
fn test_add_incompatible_kinds() {
    let (_, err) = run_err("print 1 + 'x'\n");
    assert_eq!(err.to_string(), "cannot add arguments");
}

#[test]
fn test_compare_incompatible_kinds() {
    let (_, err) = run_err("print 1 < 'x'\n");
    assert_eq!(err.to_string(), "no viable comparator");

    let (_, err) = run_err("print 1 == 'x'\n");
    assert_eq!(err.to_string(), "no viable equal operator");
}

#[test]
fn test_field_access_through_non_instance() {
    let (_, err) = run_err("x = 1\nprint x.field\n");
    assert_eq!(
        err.to_string(),
        "only class instances have fields, got number"
    );
}

#[test]
fn test_field_assignment_through_non_instance() {
    let (_, err) = run_err("x = 1\nx.field = 2\n");
    assert_eq!(
        err.to_string(),
        "only class instances have fields, got number"
    );
}

#[test]
fn test_unknown_base_class() {
    let (_, err) = run_err("class A(Missing):\n  pass\n");
    assert_eq!(err.to_string(), "base class Missing not found");
}

#[test]
fn test_error_carries_span() {
    let (_, err) = run_err("x = 1\nprint missing\n");
    assert!(err.span.is_some());
}

// Global environment

#[test]
fn test_globals_after_run() {
    let (env, interner) = run_env("x = 4\ny = x + 1\n");
    assert_eq!(env.get(interner.intern("x")), Some(Value::Int(4)));
    assert_eq!(env.get(interner.intern("y")), Some(Value::Int(5)));
}

#[test]
fn test_class_bound_in_environment() {
    let (env, interner) = run_env("class A:\n  pass\n");
    assert!(matches!(
        env.get(interner.intern("A")),
        Some(Value::Class(_))
    ));
}

#[test]
fn test_stringify_round_trip() {
    // str(v) must produce exactly the print form of v.
    let source = "\
class P:
  def __str__():
    return 'P!'
print str(P()), str(42), str('s'), str(True)
";
    assert_eq!(run(source), "P! 42 s True\n");
}

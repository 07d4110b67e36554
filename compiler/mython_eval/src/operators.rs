//! Arithmetic on primitive values.
//!
//! Direct enum-based dispatch over `(Value, Value)` pairs. The type set
//! is fixed, so pattern matching beats trait objects and keeps the error
//! cases exhaustive. Only arithmetic lives here: the short-circuit
//! operators and everything that can dispatch to a dunder method need
//! the interpreter, because dunder dispatch re-enters evaluation.

use crate::errors::{
    cannot_add, cannot_divide, cannot_multiply, cannot_subtract, division_by_zero, EvalResult,
};
use crate::value::Value;
use mython_ir::BinaryOp;

/// Evaluate an arithmetic operation on primitive operands.
///
/// Integer arithmetic wraps on overflow; division truncates toward zero
/// and reports division by zero. `Add` also concatenates strings.
/// Instances never reach this function — the interpreter dispatches
/// `__add__` before falling back here.
pub fn evaluate_arith(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add => match (left, right) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(*b))),
            (Value::Str(a), Value::Str(b)) => Ok(Value::string(format!("{}{}", &**a, &**b))),
            _ => Err(cannot_add()),
        },
        BinaryOp::Sub => match (left, right) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_sub(*b))),
            _ => Err(cannot_subtract()),
        },
        BinaryOp::Mul => match (left, right) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_mul(*b))),
            _ => Err(cannot_multiply()),
        },
        BinaryOp::Div => match (left, right) {
            (Value::Int(a), Value::Int(b)) => {
                if *b == 0 {
                    Err(division_by_zero())
                } else {
                    // i64::MIN / -1 is the single overflowing division.
                    Ok(Value::Int(a.wrapping_div(*b)))
                }
            }
            _ => Err(cannot_divide()),
        },
        BinaryOp::And | BinaryOp::Or => unreachable!("and/or short-circuit in the interpreter"),
    }
}

/// Compare like-kinded primitives with `==` or `<`.
///
/// Returns `None` when the pair is not primitively comparable — the
/// caller then tries dunder dispatch (for `==` also the two-nones rule)
/// before reporting an error.
pub fn compare_primitive(less: bool, left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(if less { a < b } else { a == b }),
        (Value::Str(a), Value::Str(b)) => Some(if less { **a < **b } else { **a == **b }),
        (Value::Bool(a), Value::Bool(b)) => Some(if less { !*a && *b } else { a == b }),
        _ => None,
    }
}

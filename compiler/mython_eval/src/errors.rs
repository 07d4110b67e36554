//! Evaluation errors and the return-carrier.
//!
//! `EvalError` doubles as the non-local unwind signal for `return`: a
//! carrier is an `EvalError` whose `control_flow` field is set. Carriers
//! propagate through `?` like real errors and are collapsed back into
//! values at method and function body boundaries — they must never reach
//! the host.

use crate::value::Value;
use mython_ir::Span;
use std::fmt;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Control flow signal carried through the error channel.
#[derive(Clone, Debug)]
pub enum ControlFlow {
    /// Return from the enclosing method or function body with a value.
    Return(Value),
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Error message.
    pub message: String,
    /// Set when this is a control flow signal rather than a real error.
    pub control_flow: Option<ControlFlow>,
    /// Source location where the error occurred, when known.
    pub span: Option<Span>,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        EvalError {
            message: message.into(),
            control_flow: None,
            span: None,
        }
    }

    /// Create a return signal carrying `value`.
    pub fn return_with(value: Value) -> Self {
        EvalError {
            message: "return".to_string(),
            control_flow: Some(ControlFlow::Return(value)),
            span: None,
        }
    }

    /// Check if this error is a control flow signal.
    #[inline]
    pub fn is_control_flow(&self) -> bool {
        self.control_flow.is_some()
    }

    /// Attach a source span if none is set yet.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Variable and field access errors

/// Undefined name in the current scope or field table.
#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::new(format!("variable {name} not found"))
}

/// Dotted access or field assignment through a value without fields.
#[cold]
pub fn no_fields(type_name: &str) -> EvalError {
    EvalError::new(format!("only class instances have fields, got {type_name}"))
}

// Arithmetic errors

#[cold]
pub fn cannot_add() -> EvalError {
    EvalError::new("cannot add arguments")
}

#[cold]
pub fn cannot_subtract() -> EvalError {
    EvalError::new("cannot subtract arguments (valid for numbers only)")
}

#[cold]
pub fn cannot_multiply() -> EvalError {
    EvalError::new("cannot multiply arguments (valid for numbers only)")
}

#[cold]
pub fn cannot_divide() -> EvalError {
    EvalError::new("cannot divide arguments (valid for numbers only)")
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::new("try to divide to zero")
}

// Comparison errors

#[cold]
pub fn no_viable_equal() -> EvalError {
    EvalError::new("no viable equal operator")
}

#[cold]
pub fn no_viable_comparator() -> EvalError {
    EvalError::new("no viable comparator")
}

/// A comparison dunder produced something other than a boolean.
#[cold]
pub fn dunder_not_boolean(method: &str) -> EvalError {
    EvalError::new(format!("{method} must return True or False"))
}

// Call errors

/// Method call on a non-instance, or on an instance lacking the method
/// with that arity.
#[cold]
pub fn not_a_class_instance() -> EvalError {
    EvalError::new("not a class instance")
}

/// Method resolution failed during invocation.
#[cold]
pub fn no_such_method(method: &str, class: &str) -> EvalError {
    EvalError::new(format!("no implementation of {method} in {class}"))
}

/// Call of a name that is neither a class nor a top-level function.
#[cold]
pub fn unknown_callable(name: &str) -> EvalError {
    EvalError::new(format!("{name} is not a class or function name"))
}

/// Wrong argument count for a top-level function.
#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::new(format!("{name} expects {expected} argument(s), got {got}"))
}

/// Base class named in a definition is not a registered class.
#[cold]
pub fn unknown_base_class(name: &str) -> EvalError {
    EvalError::new(format!("base class {name} not found"))
}

// Control flow errors

/// A return-carrier reached the top level of the program.
#[cold]
pub fn return_outside_function() -> EvalError {
    EvalError::new("return outside of a function body")
}

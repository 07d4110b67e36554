//! Tree-walking evaluator for Mython.
//!
//! The interpreter walks the arena-allocated AST, reading and mutating
//! environments and emitting output through the injected print handler.
//!
//! # `return` control flow
//!
//! `return` raises a carrier — an [`EvalError`] whose `control_flow`
//! field holds the computed value. Every node on the unwind path
//! propagates it through `?` untouched; [`Interpreter::invoke_method`]
//! and [`Interpreter::invoke_function`] are the unique catch sites where
//! the carried value becomes the call result. A carrier that reaches the
//! top level of the program is converted into a runtime error, so it can
//! never escape to the host.
//!
//! # Dunder dispatch
//!
//! The hook set is fixed: `__init__`, `__str__`, `__add__`, `__eq__`,
//! `__lt__`. Their names are interned once at construction so dispatch
//! compares a pair of `u32`s instead of strings.

use mython_ir::{
    Arena, BinaryOp, CompareOp, Expr, ExprId, ExprKind, ExprRange, Module, Name, NameRange, Stmt,
    StmtId, StmtKind, StmtRange, StringInterner,
};
use tracing::debug;

use crate::class::{Class, Method};
use crate::environment::Environment;
use crate::errors::{
    dunder_not_boolean, no_fields, no_such_method, no_viable_comparator, no_viable_equal,
    not_a_class_instance, return_outside_function, undefined_variable, unknown_base_class,
    unknown_callable, wrong_arg_count, ControlFlow, EvalError, EvalResult,
};
use crate::operators;
use crate::print_handler::SharedPrintHandler;
use crate::registry::{Callable, Function, Registry};
use crate::value::{Heap, InstanceValue, Shared, Value};

/// Pre-interned dunder and keyword names.
struct DunderNames {
    init: Name,
    str_: Name,
    add: Name,
    eq: Name,
    lt: Name,
    self_: Name,
}

impl DunderNames {
    fn new(interner: &StringInterner) -> Self {
        DunderNames {
            init: interner.intern("__init__"),
            str_: interner.intern("__str__"),
            add: interner.intern("__add__"),
            eq: interner.intern("__eq__"),
            lt: interner.intern("__lt__"),
            self_: interner.intern("self"),
        }
    }
}

/// Tree-walking interpreter over one module's arena.
pub struct Interpreter<'a> {
    interner: &'a StringInterner,
    arena: &'a Arena,
    registry: Registry,
    print: SharedPrintHandler,
    names: DunderNames,
}

/// Execute a whole module in a fresh global environment.
///
/// Returns the global environment on success, mostly for tests to poke
/// at. A stray `return` at the top level is reported as a runtime error.
pub fn run_module(
    module: &Module,
    interner: &StringInterner,
    print: SharedPrintHandler,
) -> Result<Environment, EvalError> {
    let mut interpreter = Interpreter::new(interner, &module.arena, print);
    let mut env = Environment::new();
    match interpreter.exec_block(module.body, &mut env) {
        Ok(()) => Ok(env),
        Err(e) if e.is_control_flow() => Err(return_outside_function()),
        Err(e) => Err(e),
    }
}

impl<'a> Interpreter<'a> {
    pub fn new(interner: &'a StringInterner, arena: &'a Arena, print: SharedPrintHandler) -> Self {
        Interpreter {
            names: DunderNames::new(interner),
            interner,
            arena,
            registry: Registry::new(),
            print,
        }
    }

    /// Evaluate the statements of a block in order.
    ///
    /// Returns unit (the block itself has no value) and propagates
    /// return-carriers unchanged.
    pub fn exec_block(&mut self, range: StmtRange, env: &mut Environment) -> Result<(), EvalError> {
        let arena = self.arena;
        for &stmt_id in arena.stmt_list(range) {
            self.exec_stmt(stmt_id, env)?;
        }
        Ok(())
    }

    /// Execute a single statement.
    pub fn exec_stmt(&mut self, id: StmtId, env: &mut Environment) -> Result<(), EvalError> {
        let stmt = *self.arena.stmt(id);
        self.exec_stmt_inner(&stmt, env)
            .map_err(|e| e.or_span(stmt.span))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt, env: &mut Environment) -> Result<(), EvalError> {
        match stmt.kind {
            StmtKind::Assign { name, value } => {
                let value = self.eval(value, env)?;
                env.set(name, value);
                Ok(())
            }
            StmtKind::FieldAssign {
                object,
                field,
                value,
            } => {
                let target = self.resolve_path(object, env)?;
                let instance = match target {
                    Value::Instance(instance) => instance,
                    other => return Err(no_fields(other.type_name())),
                };
                let value = self.eval(value, env)?;
                instance.fields.borrow_mut().set(field, value);
                Ok(())
            }
            StmtKind::Print(args) => {
                let arena = self.arena;
                let mut line = String::new();
                for (i, &arg) in arena.expr_list(args).iter().enumerate() {
                    let value = self.eval(arg, env)?;
                    if i > 0 {
                        line.push(' ');
                    }
                    line.push_str(&self.format_value(&value)?);
                }
                self.print.println(&line);
                Ok(())
            }
            StmtKind::Expr(expr) => {
                self.eval(expr, env)?;
                Ok(())
            }
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => {
                if self.eval(cond, env)?.is_truthy() {
                    self.exec_block(then_body, env)
                } else if let Some(else_body) = else_body {
                    self.exec_block(else_body, env)
                } else {
                    Ok(())
                }
            }
            StmtKind::Return(value) => Err(EvalError::return_with(self.eval(value, env)?)),
            StmtKind::ClassDef {
                name,
                parent,
                methods,
            } => {
                let parent_class = match parent {
                    Some(parent_name) => Some(self.registry.class(parent_name).ok_or_else(
                        || unknown_base_class(self.interner.lookup(parent_name)),
                    )?),
                    None => None,
                };
                let arena = self.arena;
                let methods: Vec<Method> = arena
                    .methods(methods)
                    .iter()
                    .map(|decl| Method {
                        name: decl.name,
                        params: arena.name_list(decl.params).to_vec(),
                        body: decl.body,
                    })
                    .collect();
                let class = Heap::new(Class::new(name, methods, parent_class));
                debug!(class = self.interner.lookup(name), "registered class");
                self.registry.define_class(class.clone());
                env.set(name, Value::Class(class));
                Ok(())
            }
            StmtKind::FuncDef { name, params, body } => {
                let arena = self.arena;
                let function = Function {
                    name,
                    params: arena.name_list(params).to_vec(),
                    body,
                };
                debug!(function = self.interner.lookup(name), "registered function");
                self.registry.define_function(function);
                Ok(())
            }
        }
    }

    /// Evaluate an expression to a value.
    pub fn eval(&mut self, id: ExprId, env: &mut Environment) -> EvalResult {
        let expr = *self.arena.expr(id);
        self.eval_inner(&expr, env).map_err(|e| e.or_span(expr.span))
    }

    fn eval_inner(&mut self, expr: &Expr, env: &mut Environment) -> EvalResult {
        match expr.kind {
            ExprKind::Number(n) => Ok(Value::Int(n)),
            ExprKind::Str(name) => Ok(Value::string(self.interner.lookup(name))),
            ExprKind::Bool(b) => Ok(Value::Bool(b)),
            ExprKind::None => Ok(Value::None),
            ExprKind::Variable(path) => self.resolve_path(path, env),
            ExprKind::Stringify(arg) => {
                let value = self.eval(arg, env)?;
                Ok(Value::string(self.format_value(&value)?))
            }
            ExprKind::Not(arg) => Ok(Value::Bool(!self.eval(arg, env)?.is_truthy())),
            ExprKind::Binary { op, left, right } => self.eval_binary(op, left, right, env),
            ExprKind::Compare { op, left, right } => self.eval_compare(op, left, right, env),
            ExprKind::Call { name, args } => self.eval_call(name, args, env),
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => self.eval_method_call(receiver, method, args, env),
        }
    }

    fn eval_binary(
        &mut self,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        env: &mut Environment,
    ) -> EvalResult {
        match op {
            // Short-circuit: the right operand must not be evaluated
            // when the left already decides the result.
            BinaryOp::And => {
                if !self.eval(left, env)?.is_truthy() {
                    Ok(Value::Bool(false))
                } else {
                    Ok(Value::Bool(self.eval(right, env)?.is_truthy()))
                }
            }
            BinaryOp::Or => {
                if self.eval(left, env)?.is_truthy() {
                    Ok(Value::Bool(true))
                } else {
                    Ok(Value::Bool(self.eval(right, env)?.is_truthy()))
                }
            }
            _ => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                if op == BinaryOp::Add {
                    if let Value::Instance(instance) = &left {
                        if instance.class.has_method(self.names.add, 1) {
                            let instance = instance.clone();
                            return self.invoke_method(&instance, self.names.add, vec![right]);
                        }
                    }
                }
                operators::evaluate_arith(op, &left, &right)
            }
        }
    }

    fn eval_compare(
        &mut self,
        op: CompareOp,
        left: ExprId,
        right: ExprId,
        env: &mut Environment,
    ) -> EvalResult {
        let left = self.eval(left, env)?;
        let right = self.eval(right, env)?;
        let result = match op {
            CompareOp::Eq => self.values_equal(&left, &right)?,
            CompareOp::NotEq => !self.values_equal(&left, &right)?,
            CompareOp::Lt => self.values_less(&left, &right)?,
            CompareOp::GtEq => !self.values_less(&left, &right)?,
            CompareOp::LtEq => {
                self.values_less(&left, &right)? || self.values_equal(&left, &right)?
            }
            CompareOp::Gt => {
                !(self.values_less(&left, &right)? || self.values_equal(&left, &right)?)
            }
        };
        Ok(Value::Bool(result))
    }

    /// Language-level equality: like-kinded primitives compare directly,
    /// an instance on the left dispatches `__eq__`, two nones are equal.
    fn values_equal(&mut self, left: &Value, right: &Value) -> Result<bool, EvalError> {
        if let Some(result) = operators::compare_primitive(false, left, right) {
            return Ok(result);
        }
        if let Value::Instance(instance) = left {
            if instance.class.has_method(self.names.eq, 1) {
                let instance = instance.clone();
                let result =
                    self.invoke_method(&instance, self.names.eq, vec![right.clone()])?;
                return result.as_bool().ok_or_else(|| dunder_not_boolean("__eq__"));
            }
        }
        if matches!((left, right), (Value::None, Value::None)) {
            return Ok(true);
        }
        Err(no_viable_equal())
    }

    /// Language-level ordering: like-kinded primitives compare directly,
    /// an instance on the left dispatches `__lt__`.
    fn values_less(&mut self, left: &Value, right: &Value) -> Result<bool, EvalError> {
        if let Some(result) = operators::compare_primitive(true, left, right) {
            return Ok(result);
        }
        if let Value::Instance(instance) = left {
            if instance.class.has_method(self.names.lt, 1) {
                let instance = instance.clone();
                let result =
                    self.invoke_method(&instance, self.names.lt, vec![right.clone()])?;
                return result.as_bool().ok_or_else(|| dunder_not_boolean("__lt__"));
            }
        }
        Err(no_viable_comparator())
    }

    fn eval_call(&mut self, name: Name, args: ExprRange, env: &mut Environment) -> EvalResult {
        match self.registry.callable(name) {
            Some(Callable::Class(class)) => self.construct(class, args, env),
            Some(Callable::Function(function)) => {
                let args = self.eval_args(args, env)?;
                self.invoke_function(&function, args)
            }
            None => Err(unknown_callable(self.interner.lookup(name))),
        }
    }

    fn eval_method_call(
        &mut self,
        receiver: ExprId,
        method: Name,
        args: ExprRange,
        env: &mut Environment,
    ) -> EvalResult {
        let receiver = self.eval(receiver, env)?;
        let argc = self.arena.expr_list(args).len();
        // The target check precedes argument evaluation: a call on a
        // non-instance or to a missing method evaluates no arguments.
        let instance = match receiver.as_instance() {
            Some(instance) if instance.class.has_method(method, argc) => instance.clone(),
            _ => return Err(not_a_class_instance()),
        };
        let args = self.eval_args(args, env)?;
        self.invoke_method(&instance, method, args)
    }

    fn eval_args(
        &mut self,
        range: ExprRange,
        env: &mut Environment,
    ) -> Result<Vec<Value>, EvalError> {
        let arena = self.arena;
        arena
            .expr_list(range)
            .iter()
            .map(|&id| self.eval(id, env))
            .collect()
    }

    /// Construct an instance of `class`.
    ///
    /// If the class (or an ancestor) defines `__init__` with matching
    /// arity it runs right after construction; otherwise the instance is
    /// returned with an empty field table and the argument expressions
    /// are left unevaluated.
    fn construct(
        &mut self,
        class: Heap<Class>,
        args: ExprRange,
        env: &mut Environment,
    ) -> EvalResult {
        let argc = self.arena.expr_list(args).len();
        let instance = InstanceValue::new(class);
        if instance.class.has_method(self.names.init, argc) {
            let args = self.eval_args(args, env)?;
            self.invoke_method(&instance, self.names.init, args)?;
        }
        Ok(Value::Instance(instance))
    }

    /// Invoke a method on an instance with already-evaluated arguments.
    ///
    /// Builds a fresh environment holding `self` and the formal
    /// parameters, runs the body, and collapses a return-carrier into
    /// the call result.
    pub fn invoke_method(
        &mut self,
        instance: &InstanceValue,
        method: Name,
        args: Vec<Value>,
    ) -> EvalResult {
        let class = instance.class.clone();
        let resolved = class.get_method(method).ok_or_else(|| {
            no_such_method(
                self.interner.lookup(method),
                self.interner.lookup(class.name()),
            )
        })?;
        if resolved.params.len() != args.len() {
            return Err(no_such_method(
                self.interner.lookup(method),
                self.interner.lookup(class.name()),
            ));
        }

        let mut call_env = Environment::new();
        call_env.set(self.names.self_, Value::Instance(instance.clone()));
        for (&param, arg) in resolved.params.iter().zip(args) {
            call_env.set(param, arg);
        }
        let body = resolved.body;
        self.run_body(body, call_env)
    }

    /// Invoke a top-level function with already-evaluated arguments.
    pub fn invoke_function(&mut self, function: &Function, args: Vec<Value>) -> EvalResult {
        if function.params.len() != args.len() {
            return Err(wrong_arg_count(
                self.interner.lookup(function.name),
                function.params.len(),
                args.len(),
            ));
        }
        let mut call_env = Environment::new();
        for (&param, arg) in function.params.iter().zip(args) {
            call_env.set(param, arg);
        }
        self.run_body(function.body, call_env)
    }

    /// Run a method or function body: the unique catch site for the
    /// return-carrier.
    fn run_body(&mut self, body: StmtRange, mut env: Environment) -> EvalResult {
        match self.exec_block(body, &mut env) {
            Ok(()) => Ok(Value::None),
            Err(e) => match e.control_flow {
                Some(ControlFlow::Return(value)) => Ok(value),
                None => Err(e),
            },
        }
    }

    /// Resolve a dotted path: the first name in the executing
    /// environment, every further name in the field table of the
    /// instance found so far.
    fn resolve_path(&self, path: NameRange, env: &Environment) -> EvalResult {
        let arena = self.arena;
        let names = arena.name_list(path);
        let (last, head) = match names.split_last() {
            Some(pair) => pair,
            None => return Err(EvalError::new("empty variable path")),
        };

        let mut fields: Option<Shared<Environment>> = None;
        for &name in head {
            let value = match &fields {
                None => env.get(name),
                Some(f) => f.borrow().get(name),
            }
            .ok_or_else(|| undefined_variable(self.interner.lookup(name)))?;
            match value {
                Value::Instance(instance) => fields = Some(instance.fields.clone()),
                other => return Err(no_fields(other.type_name())),
            }
        }

        match &fields {
            None => env.get(*last),
            Some(f) => f.borrow().get(*last),
        }
        .ok_or_else(|| undefined_variable(self.interner.lookup(*last)))
    }

    /// The print representation of a value.
    ///
    /// A none prints as the literal text `None`; booleans print
    /// `True`/`False`; strings print raw (no quoting); instances print
    /// via `__str__` when defined, else as a stable placeholder.
    pub fn format_value(&mut self, value: &Value) -> Result<String, EvalError> {
        Ok(match value {
            Value::None => "None".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Str(s) => (**s).clone(),
            Value::Class(class) => format!("Class {}", self.interner.lookup(class.name())),
            Value::Instance(instance) => {
                if instance.class.has_method(self.names.str_, 0) {
                    let instance = instance.clone();
                    let result = self.invoke_method(&instance, self.names.str_, Vec::new())?;
                    self.format_value(&result)?
                } else {
                    format!("<{} object>", self.interner.lookup(instance.class.name()))
                }
            }
        })
    }
}

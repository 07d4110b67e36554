//! End-to-end evaluator tests: source in, captured output or error out.

mod interpreter_tests;

use crate::{buffer_handler, run_module, Environment, EvalError};
use mython_ir::StringInterner;

/// Run a program and return everything it printed.
pub(crate) fn run(source: &str) -> String {
    let interner = StringInterner::new();
    let module = mython_parse::parse(source, &interner).expect("program should parse");
    let print = buffer_handler();
    run_module(&module, &interner, print.clone()).expect("program should run");
    print.get_output()
}

/// Run a program expecting a runtime error; returns the output produced
/// before the failure and the error itself.
pub(crate) fn run_err(source: &str) -> (String, EvalError) {
    let interner = StringInterner::new();
    let module = mython_parse::parse(source, &interner).expect("program should parse");
    let print = buffer_handler();
    let err = run_module(&module, &interner, print.clone())
        .expect_err("program should fail at run time");
    (print.get_output(), err)
}

/// Run a program and hand back its global environment for inspection.
pub(crate) fn run_env(source: &str) -> (Environment, StringInterner) {
    let interner = StringInterner::new();
    let module = mython_parse::parse(source, &interner).expect("program should parse");
    let env = run_module(&module, &interner, buffer_handler()).expect("program should run");
    (env, interner)
}

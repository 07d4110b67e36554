//! Library surface of the Mython CLI: the pipeline behind each command,
//! separated from argument handling so it can be tested directly.

pub mod tracing_setup;

use mython_eval::{run_module, EvalError, SharedPrintHandler};
use mython_ir::{line_col, StringInterner};
use mython_lexer::{lex_all, LexError};
use mython_parse::{ParseError, ParseErrorKind};
use std::fmt;
use tracing::debug;

/// Everything that can stop a program: lex errors, parse errors, and
/// runtime errors. All three unwind to the driver unchanged.
#[derive(Debug)]
pub enum ProgramError {
    Lex(LexError),
    Parse(ParseError),
    Runtime(EvalError),
}

impl ProgramError {
    /// Render the error for stderr, with a line:column position where
    /// one is known.
    pub fn report(&self, source: &str) -> String {
        match self {
            ProgramError::Lex(err) => {
                let (line, col) = line_col(source, err.span.start);
                format!("lex error at {line}:{col}: {err}")
            }
            ProgramError::Parse(err) => {
                let (line, col) = line_col(source, err.span.start);
                match &err.kind {
                    ParseErrorKind::Lex(inner) => format!("lex error at {line}:{col}: {inner}"),
                    ParseErrorKind::Expected(_) => {
                        format!("parse error at {line}:{col}: {err}")
                    }
                }
            }
            ProgramError::Runtime(err) => match err.span {
                Some(span) => {
                    let (line, col) = line_col(source, span.start);
                    format!("runtime error at {line}:{col}: {err}")
                }
                None => format!("runtime error: {err}"),
            },
        }
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Lex(err) => err.fmt(f),
            ProgramError::Parse(err) => err.fmt(f),
            ProgramError::Runtime(err) => err.fmt(f),
        }
    }
}

impl From<ParseError> for ProgramError {
    fn from(err: ParseError) -> Self {
        ProgramError::Parse(err)
    }
}

impl From<EvalError> for ProgramError {
    fn from(err: EvalError) -> Self {
        ProgramError::Runtime(err)
    }
}

/// Run a Mython program, printing through `print`.
pub fn run_source(source: &str, print: SharedPrintHandler) -> Result<(), ProgramError> {
    let interner = StringInterner::new();
    let module = mython_parse::parse(source, &interner)?;
    debug!(bytes = source.len(), "program parsed");
    run_module(&module, &interner, print)?;
    debug!("program finished");
    Ok(())
}

/// Tokenize a program and render one token per line.
pub fn lex_source(source: &str) -> Result<String, ProgramError> {
    let interner = StringInterner::new();
    let tokens = lex_all(source, &interner).map_err(ProgramError::Lex)?;
    debug!(tokens = tokens.len(), "program tokenized");
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format!(
            "{} @ {}\n",
            token.kind.display(&interner),
            token.span
        ));
    }
    Ok(out)
}

/// Parse a program and render a one-line summary.
pub fn parse_source(source: &str) -> Result<String, ProgramError> {
    let interner = StringInterner::new();
    let module = mython_parse::parse(source, &interner)?;
    Ok(format!(
        "parsed {} top-level statement(s), {} expression node(s)\n",
        module.arena.stmt_list(module.body).len(),
        module.arena.expr_count(),
    ))
}

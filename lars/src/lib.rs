//! Runs Lars source code through the whole pipeline: tokenizer, parser and evaluator.

use tracing::debug;

pub use lars_eval::{eval, Evaluator};
pub use lars_parser::{ast, lexer, parser};
pub use lars_source::{ErrorReporter, Position, SyntaxError};
pub use lars_value::{RuntimeError, Value, ValueType};

/// Parses `source`, returning the program together with every syntax error found.
pub fn parse(source: &str) -> (ast::Program, ErrorReporter) {
    let mut parser = parser::Parser::new(source);
    let program = parser.parse_program();
    (program, parser.into_errors())
}

/// Parses and evaluates `source`.
///
/// Returns the syntax errors if the source could not be parsed. Otherwise returns the value of the program,
/// which is a [`Value::Error`] if evaluation failed.
pub fn interpret(source: &str) -> Result<Value, ErrorReporter> {
    let (program, errors) = parse(source);
    if !errors.has_no_errors() {
        debug!(errors = errors.len(), "not evaluating, source has syntax errors");
        return Err(errors);
    }

    debug!(statements = program.statements.len(), "evaluating program");
    Ok(eval(&program))
}

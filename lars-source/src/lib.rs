//! Source positions and syntax error management.

use std::fmt;

/// A 1-based line and column in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// Create a new `Position` at the specified `line` and `col`.
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Represents a syntax error (parse time error).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub position: Position,
}

impl SyntaxError {
    /// Create a new syntax error with the specified `message` and `position`.
    pub fn new(message: impl ToString, position: Position) -> Self {
        Self {
            message: message.to_string(),
            position,
        }
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn col(&self) -> usize {
        self.position.col
    }
}

/// Ordered collection of all the errors reported while parsing a single input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReporter {
    errors: Vec<SyntaxError>,
}

impl ErrorReporter {
    /// Create an empty `ErrorReporter`.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the `ErrorReporter`.
    pub fn add_error(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }

    /// Returns `true` if `ErrorReporter` has no accumulated errors. Returns `false` otherwise.
    pub fn has_no_errors(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The accumulated errors, in the order they were reported.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxError> {
        self.errors.iter()
    }

    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a ErrorReporter {
    type Item = &'a SyntaxError;
    type IntoIter = std::slice::Iter<'a, SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(
                f,
                "ERROR: {message} at {position}",
                message = error.message,
                position = error.position
            )?;
        }

        Ok(())
    }
}

//! Runtime values produced by the evaluator.

use lars_source::Position;
use std::fmt;

/// The canonical `true` value.
pub const TRUE: Value = Value::Boolean(true);
/// The canonical `false` value.
pub const FALSE: Value = Value::Boolean(false);
/// The canonical `null` value.
pub const NULL: Value = Value::Null;

#[derive(Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    /// Signals that a `return` statement was executed.
    /// Never nests another `ReturnValue` and is unwrapped before reaching the caller.
    ReturnValue(Box<Value>),
    Error(RuntimeError),
}

/// Type of a [`Value`], as named in runtime error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Float,
    Boolean,
    Null,
    ReturnValue,
    Error,
}

/// Represents a runtime error (evaluation time error).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RuntimeError {
    pub message: String,
    pub position: Position,
}

impl RuntimeError {
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

impl Value {
    /// Returns [`TRUE`] or [`FALSE`].
    pub fn from_bool(val: bool) -> Value {
        if val {
            TRUE
        } else {
            FALSE
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Null => ValueType::Null,
            Value::ReturnValue(_) => ValueType::ReturnValue,
            Value::Error(_) => ValueType::Error,
        }
    }

    /// [`NULL`] and [`FALSE`] are falsy, every other value is truthy.
    pub fn is_truthy(&self) -> bool {
        !(*self == NULL || *self == FALSE)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Wraps the value in a [`Value::ReturnValue`] unless it already is one.
    #[must_use]
    pub fn into_return_value(self) -> Value {
        match self {
            Value::ReturnValue(_) => self,
            val => Value::ReturnValue(Box::new(val)),
        }
    }

    pub fn cast_to_error(&self) -> Option<&RuntimeError> {
        match self {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RuntimeError> for Value {
    fn from(err: RuntimeError) -> Self {
        Value::Error(err)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Integer => "INTEGER",
            ValueType::Float => "FLOAT",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Null => "NULL",
            ValueType::ReturnValue => "RETURN_VALUE",
            ValueType::Error => "ERROR",
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(val) => write!(f, "{}", val),
            // always print a fractional part (`10.0`)
            Value::Float(val) => write!(f, "{:?}", val),
            Value::Boolean(val) => write!(f, "{}", val),
            Value::Null => f.write_str("null"),
            Value::ReturnValue(val) => write!(f, "{}", val),
            Value::Error(err) => write!(f, "ERROR: {}", err.message),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Error(err) => write!(f, "ERROR: {} at {}", err.message, err.position),
            _ => fmt::Display::fmt(self, f),
        }
    }
}

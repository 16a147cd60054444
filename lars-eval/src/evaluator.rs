//! Evaluates an AST into a [`Value`].
//!
//! Evaluation never panics. Runtime errors are [`Value::Error`]s that abort every enclosing evaluation,
//! and a `return` travels up as a [`Value::ReturnValue`] until it reaches the program.

use lars_parser::ast::{BlockStmt, Expr, Program, Stmt};
use lars_parser::lexer::{Token, TokenKind};
use lars_value::{RuntimeError, Value, ValueType, NULL};
use tracing::debug;

/// Returns early from the enclosing function if the value is an error or a `return` in flight.
macro_rules! propagate {
    ($val: expr) => {{
        let val: Value = $val;
        if val.is_error() || matches!(val, Value::ReturnValue(_)) {
            return val;
        }
        val
    }};
}

/// Evaluates `program` with a fresh [`Evaluator`].
pub fn eval(program: &Program) -> Value {
    Evaluator::new().eval_program(program)
}

/// Stateless tree-walking evaluator.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates every statement in order.
    /// Returns the first error, the value of the first `return` or the value of the last statement.
    pub fn eval_program(&self, program: &Program) -> Value {
        let mut result = NULL;

        for stmt in &program.statements {
            result = self.eval_stmt(stmt);

            match result {
                Value::ReturnValue(val) => return *val,
                Value::Error(_) => return result,
                _ => {}
            }
        }

        result
    }

    /// Like [`Self::eval_program`] but a `return` is kept wrapped so it propagates through nested blocks.
    pub fn eval_block(&self, block: &BlockStmt) -> Value {
        let mut result = NULL;

        for stmt in &block.statements {
            result = self.eval_stmt(stmt);

            if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
                return result;
            }
        }

        result
    }

    pub fn eval_stmt(&self, stmt: &Stmt) -> Value {
        match stmt {
            // declarations are not bound to anything yet
            Stmt::VarDecl { .. } => NULL,
            Stmt::Return { value, .. } => {
                let val = match value {
                    Some(value) => propagate!(self.eval_expr(value)),
                    None => NULL,
                };
                val.into_return_value()
            }
            Stmt::Expr { expr, .. } => self.eval_expr(expr),
        }
    }

    pub fn eval_expr(&self, expr: &Expr) -> Value {
        match expr {
            Expr::Identifier(ident) => {
                error(&ident.token, format!("identifier not found: {}", ident.value))
            }
            Expr::IntegerLit { value, .. } => Value::Integer(*value),
            Expr::FloatLit { value, .. } => Value::Float(*value),
            Expr::BoolLit { value, .. } => Value::from_bool(*value),
            Expr::NullLit { .. } => NULL,
            Expr::Prefix { token, op, right } => {
                let right = propagate!(self.eval_expr(right));
                self.eval_prefix_expr(token, *op, right)
            }
            Expr::Infix {
                token,
                op,
                left,
                right,
            } => {
                let left = propagate!(self.eval_expr(left));
                let right = propagate!(self.eval_expr(right));
                self.eval_infix_expr(token, *op, left, right)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let condition = propagate!(self.eval_expr(condition));

                if condition.is_truthy() {
                    self.eval_block(consequence)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative)
                } else {
                    NULL
                }
            }
        }
    }

    fn eval_prefix_expr(&self, token: &Token, op: TokenKind, right: Value) -> Value {
        match op {
            TokenKind::Bang => Value::from_bool(!right.is_truthy()),
            TokenKind::Minus => match right {
                Value::Integer(val) => Value::Integer(val.wrapping_neg()),
                Value::Float(val) => Value::Float(-val),
                _ => error(
                    token,
                    format!("unknown operator: -{}", right.value_type()),
                ),
            },
            _ => error(
                token,
                format!("unknown operator: {}{}", op, right.value_type()),
            ),
        }
    }

    fn eval_infix_expr(&self, token: &Token, op: TokenKind, left: Value, right: Value) -> Value {
        match (&left, &right) {
            (Value::Integer(l), Value::Integer(r)) => self.eval_integer_infix_expr(token, op, *l, *r),
            (Value::Float(l), Value::Float(r)) => self.eval_float_infix_expr(token, op, *l, *r),
            // integers are promoted, floats are never narrowed
            (Value::Integer(l), Value::Float(r)) => {
                self.eval_float_infix_expr(token, op, *l as f64, *r)
            }
            (Value::Float(l), Value::Integer(r)) => {
                self.eval_float_infix_expr(token, op, *l, *r as f64)
            }
            (Value::Boolean(l), Value::Boolean(r)) => match op {
                TokenKind::Eq => Value::from_bool(l == r),
                TokenKind::NotEq => Value::from_bool(l != r),
                _ => unknown_infix_operator(token, op, ValueType::Boolean, ValueType::Boolean),
            },
            _ => error(
                token,
                format!(
                    "type mismatch: {} {} {}",
                    left.value_type(),
                    op,
                    right.value_type()
                ),
            ),
        }
    }

    fn eval_integer_infix_expr(&self, token: &Token, op: TokenKind, l: i64, r: i64) -> Value {
        if let Some(ordering) = compare(op, &l, &r) {
            return Value::from_bool(ordering);
        }

        match op {
            TokenKind::Plus => Value::Integer(l.wrapping_add(r)),
            TokenKind::Minus => Value::Integer(l.wrapping_sub(r)),
            TokenKind::Star => Value::Integer(l.wrapping_mul(r)),
            TokenKind::Slash | TokenKind::Percent if r == 0 => error(
                token,
                format!("division by zero: INTEGER {} INTEGER", op),
            ),
            // truncates towards zero, the remainder takes the sign of the dividend
            TokenKind::Slash => Value::Integer(l.wrapping_div(r)),
            TokenKind::Percent => Value::Integer(l.wrapping_rem(r)),
            _ => unknown_infix_operator(token, op, ValueType::Integer, ValueType::Integer),
        }
    }

    fn eval_float_infix_expr(&self, token: &Token, op: TokenKind, l: f64, r: f64) -> Value {
        if let Some(ordering) = compare(op, &l, &r) {
            return Value::from_bool(ordering);
        }

        match op {
            TokenKind::Plus => Value::Float(l + r),
            TokenKind::Minus => Value::Float(l - r),
            TokenKind::Star => Value::Float(l * r),
            TokenKind::Slash => Value::Float(l / r),
            TokenKind::Percent => Value::Float(l % r),
            _ => unknown_infix_operator(token, op, ValueType::Float, ValueType::Float),
        }
    }
}

/// Comparison operators shared by every numeric type. Returns `None` for any other operator.
fn compare<T: PartialOrd>(op: TokenKind, l: &T, r: &T) -> Option<bool> {
    match op {
        TokenKind::Lt => Some(l < r),
        TokenKind::Gt => Some(l > r),
        TokenKind::LtEq => Some(l <= r),
        TokenKind::GtEq => Some(l >= r),
        TokenKind::Eq => Some(l == r),
        TokenKind::NotEq => Some(l != r),
        _ => None,
    }
}

fn unknown_infix_operator(token: &Token, op: TokenKind, left: ValueType, right: ValueType) -> Value {
    error(
        token,
        format!("unknown operator: {} {} {}", left, op, right),
    )
}

/// Creates an error value attributed to `token`.
fn error(token: &Token, message: String) -> Value {
    debug!(line = token.line, col = token.col, "runtime error: {}", message);
    Value::Error(RuntimeError::new(message, token.position()))
}

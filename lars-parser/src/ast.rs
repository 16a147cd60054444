//! Abstract syntax tree produced by [`crate::parser::Parser`].
//!
//! Every node keeps the token it originated from so later passes can attribute errors to a position.

use crate::lexer::{Token, TokenKind};
use std::fmt;

/// The root of the tree: every top-level statement in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A `let` or `const` declaration (e.g. `let x = 1;`).
    /// The right hand side is not parsed yet; its tokens are kept as is.
    VarDecl {
        token: Token,
        name: Identifier,
        is_const: bool,
        value_tokens: Vec<Token>,
    },
    /// A `return` statement, with or without a value.
    Return { token: Token, value: Option<Expr> },
    /// An expression used as a statement (e.g. `1 + 1;`).
    Expr { token: Token, expr: Expr },
}

/// A sequence of statements between braces.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    /// The opening `{`.
    pub token: Token,
    pub statements: Vec<Stmt>,
}

/// An identifier (e.g. `foo`).
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    IntegerLit {
        token: Token,
        value: i64,
    },
    FloatLit {
        token: Token,
        value: f64,
    },
    BoolLit {
        token: Token,
        value: bool,
    },
    NullLit {
        token: Token,
    },
    /// A prefix expression (e.g. `-1` or `!ok`).
    Prefix {
        token: Token,
        op: TokenKind,
        right: Box<Expr>,
    },
    /// A binary expression (e.g. `1 + 1`). `token` is the operator.
    Infix {
        token: Token,
        op: TokenKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        token: Token,
        condition: Box<Expr>,
        consequence: BlockStmt,
        alternative: Option<BlockStmt>,
    },
}

impl Stmt {
    pub fn token(&self) -> &Token {
        match self {
            Stmt::VarDecl { token, .. } | Stmt::Return { token, .. } | Stmt::Expr { token, .. } => {
                token
            }
        }
    }
}

impl Expr {
    pub fn token(&self) -> &Token {
        match self {
            Expr::Identifier(ident) => &ident.token,
            Expr::IntegerLit { token, .. }
            | Expr::FloatLit { token, .. }
            | Expr::BoolLit { token, .. }
            | Expr::NullLit { token }
            | Expr::Prefix { token, .. }
            | Expr::Infix { token, .. }
            | Expr::If { token, .. } => token,
        }
    }
}

/* Display */

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::VarDecl {
                token,
                name,
                value_tokens,
                ..
            } => {
                write!(f, "{} {} =", token.literal, name)?;
                for tok in value_tokens {
                    write!(f, " {}", tok.literal)?;
                }
                f.write_str(";")
            }
            Stmt::Return { value: Some(value), .. } => write!(f, "return {};", value),
            Stmt::Return { value: None, .. } => f.write_str("return;"),
            Stmt::Expr { expr, .. } => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for BlockStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }

        f.write_str("{ ")?;
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", stmt)?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(ident) => write!(f, "{}", ident),
            Expr::IntegerLit { value, .. } => write!(f, "{}", value),
            Expr::FloatLit { value, .. } => write!(f, "{:?}", value),
            Expr::BoolLit { value, .. } => write!(f, "{}", value),
            Expr::NullLit { .. } => f.write_str("null"),
            Expr::Prefix { op, right, .. } => write!(f, "({}{})", op, right),
            Expr::Infix {
                op, left, right, ..
            } => write!(f, "({} {} {})", left, op, right),
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
        }
    }
}

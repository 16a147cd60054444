use crate::ast::{BlockStmt, Expr, Identifier, Program, Stmt};
use crate::lexer::{Lexer, Precedence, Token, TokenKind};
use lars_source::{ErrorReporter, Position, SyntaxError};
use std::collections::HashMap;
use tracing::{debug, trace};

mod expr;
mod stmt;

/// Parses the expression starting at the current token.
type PrefixParseFn<'a> = fn(&mut Parser<'a>) -> Option<Expr>;
/// Parses the rest of an infix expression. The current token is the operator.
type InfixParseFn<'a> = fn(&mut Parser<'a>, Expr) -> Option<Expr>;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    /// Cached token for peeking.
    peek_token: Token,
    prefix_fns: HashMap<TokenKind, PrefixParseFn<'a>>,
    infix_fns: HashMap<TokenKind, InfixParseFn<'a>>,
    /// Accumulated errors.
    errors: ErrorReporter,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Self {
            lexer,
            current_token,
            peek_token,
            prefix_fns: HashMap::new(),
            infix_fns: HashMap::new(),
            errors: ErrorReporter::new(),
        };

        parser.register_prefix(TokenKind::Ident, Self::parse_identifier_expr);
        parser.register_prefix(TokenKind::Int, Self::parse_integer_lit);
        parser.register_prefix(TokenKind::Float, Self::parse_float_lit);
        parser.register_prefix(TokenKind::True, Self::parse_bool_lit);
        parser.register_prefix(TokenKind::False, Self::parse_bool_lit);
        parser.register_prefix(TokenKind::Null, Self::parse_null_lit);
        parser.register_prefix(TokenKind::Bang, Self::parse_prefix_expr);
        parser.register_prefix(TokenKind::Minus, Self::parse_prefix_expr);
        parser.register_prefix(TokenKind::LParen, Self::parse_grouped_expr);
        parser.register_prefix(TokenKind::If, Self::parse_if_expr);

        for kind in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::LtEq,
            TokenKind::GtEq,
        ] {
            parser.register_infix(kind, Self::parse_infix_expr);
        }

        parser
    }

    fn register_prefix(&mut self, kind: TokenKind, func: PrefixParseFn<'a>) {
        self.prefix_fns.insert(kind, func);
    }

    /// Operators without an entry in the precedence table are never treated as infix.
    fn register_infix(&mut self, kind: TokenKind, func: InfixParseFn<'a>) {
        if kind.precedence().is_some() {
            self.infix_fns.insert(kind, func);
        }
    }
}

impl<'a> Parser<'a> {
    /// Parses every statement until the end of the input.
    /// Errors do not stop the parse, they are available through [`Self::errors`] afterwards.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_stmt() {
                trace!(line = stmt.token().line, col = stmt.token().col, "parsed statement");
                program.statements.push(stmt);
            }
            self.next_token();
        }

        program
    }

    /// Errors reported so far, in source order.
    pub fn errors(&self) -> &ErrorReporter {
        &self.errors
    }

    /// Consumes the parser and returns the accumulated errors.
    #[must_use]
    pub fn into_errors(self) -> ErrorReporter {
        self.errors
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current_token = std::mem::replace(&mut self.peek_token, next);
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.is(kind)
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.is(kind)
    }

    /// Advances if the peeked token is of the expected kind. Reports an error otherwise.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn peek_precedence(&self) -> Precedence {
        self.peek_token
            .kind
            .precedence()
            .unwrap_or(Precedence::Lowest)
    }

    fn current_precedence(&self) -> Precedence {
        self.current_token
            .kind
            .precedence()
            .unwrap_or(Precedence::Lowest)
    }

    fn peek_error(&mut self, kind: TokenKind) {
        let message = format!(
            "expected next token to be {}, got {} instead",
            kind, self.peek_token.kind
        );
        self.error(message, self.peek_token.position());
    }

    fn no_prefix_parse_fn_error(&mut self) {
        let message = format!(
            "no prefix parse function for {} found",
            self.current_token.kind
        );
        self.error(message, self.current_token.position());
    }

    fn error(&mut self, message: String, position: Position) {
        debug!(line = position.line, col = position.col, "{}", message);
        self.errors.add_error(SyntaxError::new(message, position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Program, ErrorReporter) {
        let mut parser = Parser::new(source);
        let program = parser.parse_program();
        (program, parser.into_errors())
    }

    fn error_messages(source: &str) -> Vec<(String, usize, usize)> {
        let (_, errors) = parse(source);
        errors
            .iter()
            .map(|e| (e.message.clone(), e.line(), e.col()))
            .collect()
    }

    #[test]
    fn test_empty_program() {
        let (program, errors) = parse("");
        assert!(program.statements.is_empty());
        assert!(errors.has_no_errors());

        let (program, _) = parse(" \n\t ");
        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_statements_in_order() {
        let (program, errors) = parse("let x = 1; return x; x + 1;");
        assert!(errors.has_no_errors(), "{}", errors);

        let kinds: Vec<_> = program
            .statements
            .iter()
            .map(|stmt| stmt.token().kind)
            .collect();
        assert_eq!(kinds, [TokenKind::Let, TokenKind::Return, TokenKind::Ident]);
    }

    #[test]
    fn test_multiple_errors() {
        assert_eq!(
            error_messages("let = 1; 1 + ; let x 3;"),
            [
                (
                    "expected next token to be IDENT, got = instead".to_string(),
                    1,
                    5
                ),
                ("no prefix parse function for ; found".to_string(), 1, 14),
                (
                    "expected next token to be =, got INT instead".to_string(),
                    1,
                    22
                ),
            ]
        );
    }

    #[test]
    fn test_errors_on_later_lines() {
        assert_eq!(
            error_messages("1;\n2;\nlet 3;"),
            [(
                "expected next token to be IDENT, got INT instead".to_string(),
                3,
                5
            )]
        );
    }

    #[test]
    fn test_recovers_after_bad_declaration() {
        let (program, errors) = parse("let = 1; const z = 3;");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.to_string(), "const z = 3;");
    }

    #[test]
    fn test_every_registered_parse_fn() {
        let (program, errors) =
            parse("x; 1; 2.5; true; false; null; !x; -1; (1); 1 + 2 * 3 % 4; if (x) { 1 } else { 2 }");
        assert!(errors.has_no_errors(), "{}", errors);
        assert_eq!(
            program.to_string(),
            "x 1 2.5 true false null (!x) (-1) 1 (1 + ((2 * 3) % 4)) if x { 1 } else { 2 }"
        );
    }

    #[test]
    fn test_errors_in_parser_are_not_shared() {
        let (_, first) = parse("let;");
        let (_, second) = parse("1 + 2;");
        assert_eq!(first.len(), 1);
        assert!(second.has_no_errors());
    }
}

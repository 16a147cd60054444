use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses an expression, consuming infix operators that bind tighter than `precedence`.
    /// To parse any expression, use `Precedence::Lowest`.
    ///
    /// Leaves the current token on the last token of the expression.
    pub fn parse_expr(&mut self, precedence: Precedence) -> Option<Expr> {
        let prefix = match self.prefix_fns.get(&self.current_token.kind) {
            Some(prefix) => *prefix,
            None => {
                self.no_prefix_parse_fn_error();
                return None;
            }
        };
        let mut lhs = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let infix = match self.infix_fns.get(&self.peek_token.kind) {
                Some(infix) => *infix,
                None => return Some(lhs), // not a valid binop, stop parsing
            };
            self.next_token();

            lhs = infix(self, lhs)?;
        }

        Some(lhs)
    }

    /* Expressions.Literals */
    pub(super) fn parse_integer_lit(&mut self) -> Option<Expr> {
        let token = self.current_token.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expr::IntegerLit { token, value }),
            Err(_) => {
                let message = format!("could not parse {:?} as integer", token.literal);
                self.error(message, token.position());
                None
            }
        }
    }

    pub(super) fn parse_float_lit(&mut self) -> Option<Expr> {
        let token = self.current_token.clone();
        match token.literal.parse::<f64>() {
            Ok(value) => Some(Expr::FloatLit { token, value }),
            Err(_) => {
                let message = format!("could not parse {:?} as float", token.literal);
                self.error(message, token.position());
                None
            }
        }
    }

    pub(super) fn parse_bool_lit(&mut self) -> Option<Expr> {
        Some(Expr::BoolLit {
            value: self.current_is(TokenKind::True),
            token: self.current_token.clone(),
        })
    }

    pub(super) fn parse_null_lit(&mut self) -> Option<Expr> {
        Some(Expr::NullLit {
            token: self.current_token.clone(),
        })
    }

    /* Expressions.Identifier */
    pub(super) fn parse_identifier_expr(&mut self) -> Option<Expr> {
        Some(Expr::Identifier(Identifier {
            token: self.current_token.clone(),
            value: self.current_token.literal.clone(),
        }))
    }

    /* Expressions.Operators */
    pub(super) fn parse_prefix_expr(&mut self) -> Option<Expr> {
        let token = self.current_token.clone();
        self.next_token();

        let right = self.parse_expr(Precedence::Prefix)?;
        Some(Expr::Prefix {
            op: token.kind,
            token,
            right: Box::new(right),
        })
    }

    pub(super) fn parse_infix_expr(&mut self, lhs: Expr) -> Option<Expr> {
        let token = self.current_token.clone();
        let precedence = self.current_precedence();
        self.next_token();

        let rhs = self.parse_expr(precedence)?;
        Some(Expr::Infix {
            op: token.kind,
            token,
            left: Box::new(lhs),
            right: Box::new(rhs),
        })
    }

    /// Parses `( expr )`. Grouping does not produce a node of its own.
    pub(super) fn parse_grouped_expr(&mut self) -> Option<Expr> {
        self.next_token();

        let expr = self.parse_expr(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    /* Expressions.Conditionals */
    /// Parses `if (cond) { ... }` with an optional `else { ... }` or `elif (cond) { ... }` tail.
    /// An `elif` becomes an alternative block holding the nested `if` expression.
    pub(super) fn parse_if_expr(&mut self) -> Option<Expr> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expr(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) || !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_stmt();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_stmt())
        } else if self.peek_is(TokenKind::Elif) {
            self.next_token();
            let elif_token = self.current_token.clone();
            let nested = self.parse_if_expr()?;
            Some(BlockStmt {
                token: elif_token.clone(),
                statements: vec![Stmt::Expr {
                    token: elif_token,
                    expr: nested,
                }],
            })
        } else {
            None
        };

        Some(Expr::If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn program(source: &str) -> String {
        let mut parser = Parser::new(source);
        let program = parser.parse_program();
        assert!(parser.errors().has_no_errors(), "{}", parser.errors());
        program.to_string()
    }

    fn expr(source: &str) -> Expr {
        let mut parser = Parser::new(source);
        let mut program = parser.parse_program();
        assert!(parser.errors().has_no_errors(), "{}", parser.errors());
        assert_eq!(program.statements.len(), 1);
        match program.statements.remove(0) {
            Stmt::Expr { expr, .. } => expr,
            stmt => panic!("expected an expression statement, got {:?}", stmt),
        }
    }

    #[test]
    fn test_literal() {
        assert!(matches!(expr("true"), Expr::BoolLit { value: true, .. }));
        assert!(matches!(expr("false"), Expr::BoolLit { value: false, .. }));
        assert!(matches!(expr("null"), Expr::NullLit { .. }));
        assert!(matches!(expr("5;"), Expr::IntegerLit { value: 5, .. }));
        match expr("2.5") {
            Expr::FloatLit { value, token } => {
                assert_eq!(value, 2.5);
                assert_eq!(token.literal, "2.5");
            }
            other => panic!("expected a float literal, got {:?}", other),
        }
        assert_snapshot!(program("2.0"), @"2.0");
        assert_snapshot!(program("7."), @"7.0");
    }

    #[test]
    fn test_integer_lit_is_decimal() {
        // a leading zero does not switch to octal
        assert!(matches!(expr("010"), Expr::IntegerLit { value: 10, .. }));
        assert!(matches!(expr("09"), Expr::IntegerLit { value: 9, .. }));
        assert_snapshot!(program("007 + 1"), @"(7 + 1)");
    }

    #[test]
    fn test_identifier() {
        match expr("foobar;") {
            Expr::Identifier(ident) => {
                assert_eq!(ident.value, "foobar");
                assert_eq!(ident.token.kind, TokenKind::Ident);
            }
            other => panic!("expected an identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_prefix_expr() {
        match expr("-15") {
            Expr::Prefix { op, right, token } => {
                assert_eq!(op, TokenKind::Minus);
                assert_eq!((token.line, token.col), (1, 1));
                assert!(matches!(*right, Expr::IntegerLit { value: 15, .. }));
            }
            other => panic!("expected a prefix expression, got {:?}", other),
        }
        assert_snapshot!(program("!5"), @"(!5)");
        assert_snapshot!(program("!-a"), @"(!(-a))");
        assert_snapshot!(program("!!true"), @"(!(!true))");
    }

    #[test]
    fn test_infix_expr() {
        match expr("5 % 2") {
            Expr::Infix {
                op, left, right, token,
            } => {
                assert_eq!(op, TokenKind::Percent);
                assert_eq!(token.col, 3);
                assert!(matches!(*left, Expr::IntegerLit { value: 5, .. }));
                assert!(matches!(*right, Expr::IntegerLit { value: 2, .. }));
            }
            other => panic!("expected an infix expression, got {:?}", other),
        }
        assert_snapshot!(program("5 + 5"), @"(5 + 5)");
        assert_snapshot!(program("5 != 5"), @"(5 != 5)");
        assert_snapshot!(program("5 <= 5"), @"(5 <= 5)");
        assert_snapshot!(program("true == false"), @"(true == false)");
    }

    #[test]
    fn test_precedence() {
        assert_snapshot!(program("-a * b"), @"((-a) * b)");
        assert_snapshot!(program("a + b + c"), @"((a + b) + c)");
        assert_snapshot!(program("a + b - c"), @"((a + b) - c)");
        assert_snapshot!(program("a * b * c"), @"((a * b) * c)");
        assert_snapshot!(program("a * b / c"), @"((a * b) / c)");
        assert_snapshot!(program("a % b * c"), @"((a % b) * c)");
        assert_snapshot!(program("a + b / c"), @"(a + (b / c))");
        assert_snapshot!(program("a + b * c + d / e - f"), @"(((a + (b * c)) + (d / e)) - f)");
        assert_snapshot!(program("3 + 4; -5 * 5"), @"(3 + 4) ((-5) * 5)");
        assert_snapshot!(program("5 > 4 == 3 < 4"), @"((5 > 4) == (3 < 4))");
        assert_snapshot!(program("5 < 4 != 3 > 4"), @"((5 < 4) != (3 > 4))");
        assert_snapshot!(program("a <= b == c >= d"), @"((a <= b) == (c >= d))");
        assert_snapshot!(program("3 + 4 * 5 == 3 * 1 + 4 * 5"), @"((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))");
        assert_snapshot!(program("3 > 5 == false"), @"((3 > 5) == false)");
    }

    #[test]
    fn test_grouped_expr() {
        assert_snapshot!(program("1 + (2 + 3) + 4"), @"((1 + (2 + 3)) + 4)");
        assert_snapshot!(program("(5 + 5) * 2"), @"((5 + 5) * 2)");
        assert_snapshot!(program("2 / (5 + 5)"), @"(2 / (5 + 5))");
        assert_snapshot!(program("-(5 + 5)"), @"(-(5 + 5))");
        assert_snapshot!(program("!(true == true)"), @"(!(true == true))");
    }

    #[test]
    fn test_if_expr() {
        assert_snapshot!(program("if (x < y) { x }"), @"if (x < y) { x }");
        assert_snapshot!(program("if (x < y) { x } else { y }"), @"if (x < y) { x } else { y }");
        assert_snapshot!(program("if (a) { 1; 2 }"), @"if a { 1; 2 }");
        assert_snapshot!(program("if (a) { }"), @"if a { }");

        match expr("if (x) { 1 }") {
            Expr::If {
                alternative,
                consequence,
                ..
            } => {
                assert!(alternative.is_none());
                assert_eq!(consequence.statements.len(), 1);
                assert_eq!(consequence.token.kind, TokenKind::LBrace);
            }
            other => panic!("expected an if expression, got {:?}", other),
        }
    }

    #[test]
    fn test_elif_chain() {
        assert_snapshot!(
            program("if (a) { 1 } elif (b) { 2 } else { 3 }"),
            @"if a { 1 } else { if b { 2 } else { 3 } }"
        );
        assert_snapshot!(
            program("if (a) { 1 } elif (b) { 2 } elif (c) { 3 }"),
            @"if a { 1 } else { if b { 2 } else { if c { 3 } } }"
        );
    }

    #[test]
    fn test_no_prefix_parse_fn() {
        let mut parser = Parser::new("fn(x)");
        let program = parser.parse_program();
        let errors = parser.errors().errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "no prefix parse function for FUNCTION found");
        assert_eq!(program.to_string(), "x");

        let mut parser = Parser::new("[1]");
        parser.parse_program();
        assert_eq!(
            parser.errors().errors()[0].message,
            "no prefix parse function for [ found"
        );
    }

    #[test]
    fn test_integer_overflow() {
        let mut parser = Parser::new("99999999999999999999");
        let program = parser.parse_program();
        assert!(program.statements.is_empty());

        let errors = parser.errors().errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            r#"could not parse "99999999999999999999" as integer"#
        );
        assert_eq!((errors[0].line(), errors[0].col()), (1, 1));
    }

    #[test]
    fn test_unclosed_delimiters() {
        let mut parser = Parser::new("(1 + 2");
        parser.parse_program();
        let errors = parser.errors().errors();
        assert_eq!(errors[0].message, "expected next token to be ), got EOF instead");
        assert_eq!((errors[0].line(), errors[0].col()), (1, 7));

        let mut parser = Parser::new("if (1) { 2");
        parser.parse_program();
        assert_eq!(
            parser.errors().errors()[0].message,
            "expected next token to be }, got EOF instead"
        );

        let mut parser = Parser::new("if 1 { 2 }");
        parser.parse_program();
        assert_eq!(
            parser.errors().errors()[0].message,
            "expected next token to be (, got INT instead"
        );
    }

    #[test]
    fn test_non_infix_operator_stops_expression() {
        // `=` has no precedence, so parsing stops after `a` and `=` starts a new statement.
        let mut parser = Parser::new("a = 1");
        let program = parser.parse_program();
        assert_eq!(
            parser.errors().errors()[0].message,
            "no prefix parse function for = found"
        );
        assert_eq!(program.to_string(), "a 1");
    }
}

use super::*;

impl<'a> Parser<'a> {
    /// Parses a statement. Returns `None` if the statement could not be parsed.
    pub fn parse_stmt(&mut self) -> Option<Stmt> {
        match self.current_token.kind {
            TokenKind::Let | TokenKind::Const => self.parse_var_decl(),
            TokenKind::Return => self.parse_return_stmt(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// Parses the statements between `{` and `}`. The current token must be the opening brace.
    pub fn parse_block_stmt(&mut self) -> BlockStmt {
        let token = self.current_token.clone();
        self.next_token();

        let mut statements = Vec::new();
        while !self.current_is(TokenKind::RBrace) {
            if self.current_is(TokenKind::Eof) {
                let message = format!(
                    "expected next token to be {}, got {} instead",
                    TokenKind::RBrace,
                    TokenKind::Eof
                );
                self.error(message, self.current_token.position());
                break;
            }

            if let Some(stmt) = self.parse_stmt() {
                statements.push(stmt);
            }
            self.next_token();
        }

        BlockStmt { token, statements }
    }

    /// Parses `let name = ...;` or `const name = ...;`.
    /// The right hand side is only collected as tokens, it is not parsed yet.
    fn parse_var_decl(&mut self) -> Option<Stmt> {
        let token = self.current_token.clone();
        let is_const = token.is(TokenKind::Const);

        if !self.expect_peek(TokenKind::Ident) {
            self.skip_to_semi();
            return None;
        }
        let name = Identifier {
            token: self.current_token.clone(),
            value: self.current_token.literal.clone(),
        };

        if !self.expect_peek(TokenKind::Assign) {
            self.skip_to_semi();
            return None;
        }

        // an unmatched `}` closes the enclosing block
        let mut value_tokens = Vec::new();
        let mut depth = 0usize;
        while !self.peek_is(TokenKind::Semicolon) && !self.peek_is(TokenKind::Eof) {
            if self.peek_is(TokenKind::RBrace) {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            } else if self.peek_is(TokenKind::LBrace) {
                depth += 1;
            }
            self.next_token();
            value_tokens.push(self.current_token.clone());
        }
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token(); // eat `;`
        }

        Some(Stmt::VarDecl {
            token,
            name,
            is_const,
            value_tokens,
        })
    }

    fn parse_return_stmt(&mut self) -> Option<Stmt> {
        let token = self.current_token.clone();

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
            return Some(Stmt::Return { token, value: None });
        }
        if self.peek_is(TokenKind::RBrace) || self.peek_is(TokenKind::Eof) {
            return Some(Stmt::Return { token, value: None });
        }

        self.next_token();
        let value = self.parse_expr(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Stmt::Return {
            token,
            value: Some(value),
        })
    }

    fn parse_expr_stmt(&mut self) -> Option<Stmt> {
        let token = self.current_token.clone();
        let expr = self.parse_expr(Precedence::Lowest)?;

        // semicolon is optional
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Stmt::Expr { token, expr })
    }

    /// Skips tokens until the current token is a `;` or the end of the input.
    fn skip_to_semi(&mut self) {
        while !self.current_is(TokenKind::Semicolon) && !self.current_is(TokenKind::Eof) {
            self.next_token();
        }
    }
}

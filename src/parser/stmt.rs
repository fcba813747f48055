use super::*;

impl Parser {
    pub fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match &self.current().kind {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => self.parse_if(),
            TokenKind::Foreach => self.parse_foreach(),
            TokenKind::Var => {
                let line = self.current().line;
                self.advance();
                let name = self.expect_ident("variable name after 'var'")?;
                if !self.check_exact(&TokenKind::Assign) {
                    return Err(self.error(format!(
                        "Implicitly-typed variable '{}' must be initialized",
                        name
                    )));
                }
                self.advance();
                let init = self.parse_expr()?;
                self.expect_exact(&TokenKind::Semi)?;
                Ok(Stmt::Local {
                    ty: None,
                    name,
                    init: Some(init),
                    line,
                })
            }
            TokenKind::Ident(_) => {
                let line = self.current().line;
                if let Some((ty, name)) = self.try_parse_declarator() {
                    let init = if self.check_exact(&TokenKind::Assign) {
                        self.advance();
                        Some(self.parse_expr()?)
                    } else {
                        None
                    };
                    self.expect_exact(&TokenKind::Semi)?;
                    return Ok(Stmt::Local {
                        ty: Some(ty),
                        name,
                        init,
                        line,
                    });
                }
                self.parse_expr_stmt()
            }
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_expr_stmt(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expr()?;
        if self.check_exact(&TokenKind::Assign) {
            self.advance();
            let value = self.parse_expr()?;
            self.expect_exact(&TokenKind::Semi)?;
            return Ok(Stmt::Assign(expr, value));
        }
        self.expect_exact(&TokenKind::Semi)?;
        Ok(Stmt::Expr(expr))
    }

    fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        self.expect_exact(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check_exact(&TokenKind::RBrace) {
            if self.is_eof() {
                return Err(self.error("Unterminated block: expected '}'"));
            }
            stmts.push(self.parse_stmt()?);
        }
        self.advance();
        Ok(Stmt::Block(stmts))
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.expect_exact(&TokenKind::If)?;
        self.expect_exact(&TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect_exact(&TokenKind::RParen)?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.check_exact(&TokenKind::Else) {
            self.advance();
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_foreach(&mut self) -> Result<Stmt, ParseError> {
        self.expect_exact(&TokenKind::Foreach)?;
        self.expect_exact(&TokenKind::LParen)?;

        let (ty, name) = if self.check_exact(&TokenKind::Var) {
            self.advance();
            (None, self.expect_ident("loop variable name")?)
        } else {
            match self.try_parse_declarator() {
                Some((ty, name)) => (Some(ty), name),
                None => return Err(self.error("Expected 'var' or a type in foreach")),
            }
        };

        self.expect_exact(&TokenKind::In)?;
        let iter = self.parse_expr()?;
        self.expect_exact(&TokenKind::RParen)?;
        let body = Box::new(self.parse_stmt()?);

        Ok(Stmt::Foreach {
            ty,
            name,
            iter,
            body,
        })
    }
}

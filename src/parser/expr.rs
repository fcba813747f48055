use super::*;

impl Parser {
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn binary(&mut self, op: BinOp, left: Expr, right: Expr) -> Expr {
        let (line, col) = (left.line, left.col);
        self.node_at(line, col, ExprKind::Binary(op, Box::new(left), Box::new(right)))
    }

    pub(super) fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check_exact(&TokenKind::OrOr) {
            self.advance();
            let right = self.parse_and()?;
            left = self.binary(BinOp::Or, left, right);
        }

        Ok(left)
    }

    pub(super) fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;

        while self.check_exact(&TokenKind::AndAnd) {
            self.advance();
            let right = self.parse_equality()?;
            left = self.binary(BinOp::And, left, right);
        }

        Ok(left)
    }

    pub(super) fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = match &self.current().kind {
                TokenKind::Eq => BinOp::Eq,
                TokenKind::Neq => BinOp::Neq,
                _ => break,
            };
            self.advance();
            let right = self.parse_relational()?;
            left = self.binary(op, left, right);
        }

        Ok(left)
    }

    /// Relational operators are left-associative, so `< 1 >` inside brackets
    /// comes out as `(missing < 1) > missing`.
    pub(super) fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match &self.current().kind {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Lte => BinOp::Lte,
                TokenKind::Gte => BinOp::Gte,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = self.binary(op, left, right);
        }

        Ok(left)
    }

    pub(super) fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match &self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = self.binary(op, left, right);
        }

        Ok(left)
    }

    pub(super) fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match &self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Rem,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = self.binary(op, left, right);
        }

        Ok(left)
    }

    pub(super) fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match &self.current().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix(),
        };
        let (line, col) = (self.current().line, self.current().col);
        self.advance();
        let operand = self.parse_unary()?;
        Ok(self.node_at(line, col, ExprKind::Unary(op, Box::new(operand))))
    }

    pub(super) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            let (line, col) = (expr.line, expr.col);
            match &self.current().kind {
                TokenKind::Dot => {
                    self.advance();
                    let name = self.expect_ident("member name after '.'")?;
                    expr = self.node_at(line, col, ExprKind::Member(Box::new(expr), name));
                }
                TokenKind::LParen => {
                    self.advance();
                    let args = self.parse_args(&TokenKind::RParen)?;
                    expr = self.node_at(line, col, ExprKind::Call(Box::new(expr), args));
                }
                TokenKind::LBracket => {
                    self.advance();
                    let args = self.parse_args(&TokenKind::RBracket)?;
                    expr = self.node_at(line, col, ExprKind::Index(Box::new(expr), args));
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Comma-separated arguments up to and including `close`. An empty slot
    /// between commas becomes a `Missing` argument.
    pub(super) fn parse_args(&mut self, close: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if self.check_exact(close) {
            self.advance();
            return Ok(args);
        }

        loop {
            args.push(self.parse_expr()?);
            if self.check_exact(&TokenKind::Comma) {
                self.advance();
                continue;
            }
            break;
        }

        self.expect_exact(close)?;
        Ok(args)
    }

    /// Tokens that end an operand without starting one. Seeing one where an
    /// operand is required yields a `Missing` node rather than an error.
    fn ends_operand(kind: &TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Lte
                | TokenKind::Gte
                | TokenKind::Comma
                | TokenKind::Semi
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }

    pub(super) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current().kind.clone() {
            TokenKind::Int(i) => {
                let node = self.node_here(ExprKind::Literal(Literal::Int(i)));
                self.advance();
                Ok(node)
            }
            TokenKind::Double(f) => {
                let node = self.node_here(ExprKind::Literal(Literal::Double(f)));
                self.advance();
                Ok(node)
            }
            TokenKind::Str(s) => {
                let node = self.node_here(ExprKind::Literal(Literal::Str(s)));
                self.advance();
                Ok(node)
            }
            TokenKind::Char(c) => {
                let node = self.node_here(ExprKind::Literal(Literal::Char(c)));
                self.advance();
                Ok(node)
            }
            TokenKind::Bool(b) => {
                let node = self.node_here(ExprKind::Literal(Literal::Bool(b)));
                self.advance();
                Ok(node)
            }
            TokenKind::Null => {
                let node = self.node_here(ExprKind::Literal(Literal::Null));
                self.advance();
                Ok(node)
            }
            TokenKind::Ident(name) => {
                let node = self.node_here(ExprKind::Ident(name));
                self.advance();
                Ok(node)
            }
            TokenKind::LParen => {
                let (line, col) = (self.current().line, self.current().col);
                self.advance();
                let inner = self.parse_expr()?;
                self.expect_exact(&TokenKind::RParen)?;
                Ok(self.node_at(line, col, ExprKind::Paren(Box::new(inner))))
            }
            TokenKind::LBracket => {
                // A bracket with nothing in front: element access whose receiver is missing.
                let (line, col) = (self.current().line, self.current().col);
                let receiver = self.node_here(ExprKind::Missing);
                self.advance();
                let args = self.parse_args(&TokenKind::RBracket)?;
                Ok(self.node_at(line, col, ExprKind::Index(Box::new(receiver), args)))
            }
            TokenKind::New => self.parse_new(),
            ref kind if Self::ends_operand(kind) => Ok(self.node_here(ExprKind::Missing)),
            _ => Err(self.error(format!(
                "Unexpected token in expression: {:?}",
                self.current().kind
            ))),
        }
    }

    /// `new T(args)`, `new T { init }` or `new T(args) { init }`
    pub(super) fn parse_new(&mut self) -> Result<Expr, ParseError> {
        let (line, col) = (self.current().line, self.current().col);
        self.expect_exact(&TokenKind::New)?;
        let ty = self.parse_type()?;

        let args = if self.check_exact(&TokenKind::LParen) {
            self.advance();
            Some(self.parse_args(&TokenKind::RParen)?)
        } else {
            None
        };

        let init = if self.check_exact(&TokenKind::LBrace) {
            self.advance();
            Some(self.parse_initializer()?)
        } else {
            None
        };

        if args.is_none() && init.is_none() {
            return Err(self.error(format!(
                "Expected '(' or '{{' after type in new expression, found {:?}",
                self.current().kind
            )));
        }

        Ok(self.node_at(line, col, ExprKind::New { ty, args, init }))
    }

    /// Elements of `{ a, b, c }` after the opening brace; a trailing comma is allowed.
    fn parse_initializer(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut elements = Vec::new();

        while !self.check_exact(&TokenKind::RBrace) && !self.is_eof() {
            elements.push(self.parse_expr()?);
            if self.check_exact(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }

        self.expect_exact(&TokenKind::RBrace)?;
        Ok(elements)
    }
}

use super::*;

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token { kind: TokenKind::Eof, .. })) {
            let (line, col) = tokens.last().map(|t| (t.line, t.col)).unwrap_or((1, 1));
            tokens.push(Token {
                kind: TokenKind::Eof,
                line,
                col,
            });
        }
        Parser {
            tokens,
            pos: 0,
            ids: NodeIds::new(),
        }
    }

    pub(super) fn error(&self, msg: impl Into<String>) -> ParseError {
        let tok = self.current();
        ParseError::Error {
            msg: msg.into(),
            line: tok.line,
            col: tok.col,
        }
    }

    pub(super) fn current(&self) -> &Token {
        self.peek(0)
    }

    pub(super) fn peek(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub(super) fn advance(&mut self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    pub(super) fn check_exact(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    pub(super) fn is_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    pub(super) fn expect_exact(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if &self.current().kind == kind {
            Ok(self.advance().clone())
        } else {
            Err(self.error(format!(
                "Expected {:?}, found {:?}",
                kind,
                self.current().kind
            )))
        }
    }

    pub(super) fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        match &self.current().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(self.error(format!("Expected {}, found {:?}", what, other))),
        }
    }

    /// Build a node positioned at the current token.
    pub(super) fn node_here(&mut self, kind: ExprKind) -> Expr {
        let (line, col) = (self.current().line, self.current().col);
        self.node_at(line, col, kind)
    }

    pub(super) fn node_at(&mut self, line: usize, col: usize, kind: ExprKind) -> Expr {
        Expr {
            id: self.ids.fresh(),
            line,
            col,
            kind,
        }
    }

    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();

        while !self.is_eof() {
            stmts.push(self.parse_stmt()?);
        }

        Ok(Program {
            stmts,
            next_id: self.ids.peek(),
        })
    }
}

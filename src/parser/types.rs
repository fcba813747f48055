use super::*;

impl Parser {
    /// `Name`, `Name<T, U>`, any of those followed by `[]` suffixes.
    pub(super) fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let name = self.expect_ident("type name")?;

        let mut args = Vec::new();
        if self.check_exact(&TokenKind::Lt) {
            self.advance();
            loop {
                args.push(self.parse_type()?);
                if self.check_exact(&TokenKind::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
            self.expect_exact(&TokenKind::Gt)?;
        }

        let mut ty = TypeExpr::Named(name, args);
        while self.check_exact(&TokenKind::LBracket)
            && self.peek(1).kind == TokenKind::RBracket
        {
            self.advance();
            self.advance();
            ty = TypeExpr::Array(Box::new(ty));
        }

        Ok(ty)
    }

    /// Speculatively read `T name` at a statement start. Restores the
    /// position and returns `None` when the tokens are not a declaration.
    pub(super) fn try_parse_declarator(&mut self) -> Option<(TypeExpr, String)> {
        let saved = self.pos;
        if let Ok(ty) = self.parse_type() {
            if let TokenKind::Ident(name) = &self.current().kind {
                let follows = &self.peek(1).kind;
                if matches!(follows, TokenKind::Assign | TokenKind::Semi | TokenKind::In) {
                    let name = name.clone();
                    self.advance();
                    return Some((ty, name));
                }
            }
        }
        self.pos = saved;
        None
    }
}

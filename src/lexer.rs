use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Double(f64),
    Str(String),
    Char(char),
    Bool(bool),
    Null,
    // Identifiers (predefined type names like `int` included)
    Ident(String),
    // Keywords
    Var,
    New,
    If,
    Else,
    Foreach,
    In,
    // Operators
    Eq,       // ==
    Neq,      // !=
    Lte,      // <=
    Gte,      // >=
    AndAnd,   // &&
    OrOr,     // ||
    Assign,   // =
    Bang,     // !
    Lt,       // <
    Gt,       // >
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    Percent,  // %
    Dot,      // .
    Comma,    // ,
    Semi,     // ;
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Error)]
pub enum LexerError {
    #[error("Lexer error [{line}:{col}]: {msg}")]
    Error {
        msg: String,
        line: usize,
        col: usize,
    },
}

fn keyword(s: &str) -> Option<TokenKind> {
    match s {
        "var" => Some(TokenKind::Var),
        "new" => Some(TokenKind::New),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "foreach" => Some(TokenKind::Foreach),
        "in" => Some(TokenKind::In),
        "true" => Some(TokenKind::Bool(true)),
        "false" => Some(TokenKind::Bool(false)),
        "null" => Some(TokenKind::Null),
        _ => None,
    }
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn error(&self, msg: impl Into<String>) -> LexerError {
        LexerError::Error {
            msg: msg.into(),
            line: self.line,
            col: self.col,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();

        while self.pos < self.chars.len() {
            if let Some(tok) = self.scan_token()? {
                tokens.push(tok);
            }
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            line: self.line,
            col: self.col,
        });

        Ok(tokens)
    }

    fn scan_token(&mut self) -> Result<Option<Token>, LexerError> {
        let ch = match self.current() {
            Some(c) => c,
            None => return Ok(None),
        };

        if ch.is_whitespace() {
            self.advance();
            return Ok(None);
        }

        if ch == '/' && self.peek(1) == Some('/') {
            self.skip_line_comment();
            return Ok(None);
        }

        if ch == '/' && self.peek(1) == Some('*') {
            self.skip_block_comment()?;
            return Ok(None);
        }

        if ch == '"' {
            return self.scan_string().map(Some);
        }

        if ch == '\'' {
            return self.scan_char().map(Some);
        }

        if ch.is_ascii_digit() {
            return self.scan_number().map(Some);
        }

        if ch.is_alphabetic() || ch == '_' {
            return Ok(Some(self.scan_identifier()));
        }

        self.scan_operator().map(Some)
    }

    fn skip_line_comment(&mut self) {
        while self.pos < self.chars.len() && self.chars[self.pos] != '\n' {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexerError> {
        let (line, col) = (self.line, self.col);
        self.advance(); // /
        self.advance(); // *
        loop {
            match self.current() {
                None => {
                    return Err(LexerError::Error {
                        msg: "Unterminated block comment".to_string(),
                        line,
                        col,
                    })
                }
                Some('*') if self.peek(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn scan_escape(&mut self, what: &str) -> Result<char, LexerError> {
        match self.advance() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('0') => Ok('\0'),
            Some('"') => Ok('"'),
            Some('\'') => Ok('\''),
            Some('\\') => Ok('\\'),
            Some(c) => Err(self.error(format!("Unknown escape sequence '\\{}' in {}", c, what))),
            None => Err(self.error(format!("Unterminated {}", what))),
        }
    }

    fn scan_string(&mut self) -> Result<Token, LexerError> {
        let line = self.line;
        let col = self.col;
        self.advance(); // consume opening "

        let mut text = String::new();
        loop {
            match self.current() {
                None | Some('\n') => return Err(self.error("Unterminated string literal")),
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    text.push(self.scan_escape("string literal")?);
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }

        Ok(Token {
            kind: TokenKind::Str(text),
            line,
            col,
        })
    }

    fn scan_char(&mut self) -> Result<Token, LexerError> {
        let line = self.line;
        let col = self.col;
        self.advance(); // consume opening '

        let value = match self.current() {
            None | Some('\n') | Some('\'') => return Err(self.error("Empty character literal")),
            Some('\\') => {
                self.advance();
                self.scan_escape("character literal")?
            }
            Some(c) => {
                self.advance();
                c
            }
        };

        if self.current() != Some('\'') {
            return Err(self.error("Character literal must contain exactly one character"));
        }
        self.advance();

        Ok(Token {
            kind: TokenKind::Char(value),
            line,
            col,
        })
    }

    fn scan_number(&mut self) -> Result<Token, LexerError> {
        let line = self.line;
        let col = self.col;
        let mut num_str = String::new();
        let mut is_double = false;

        while let Some(c) = self.current() {
            if c.is_ascii_digit() {
                num_str.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if self.current() == Some('.') && self.peek(1).map(|c| c.is_ascii_digit()).unwrap_or(false)
        {
            is_double = true;
            num_str.push('.');
            self.advance(); // consume '.'
            while let Some(c) = self.current() {
                if c.is_ascii_digit() {
                    num_str.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        if is_double {
            let f: f64 = num_str
                .parse()
                .map_err(|_| self.error("Invalid floating-point literal"))?;
            Ok(Token {
                kind: TokenKind::Double(f),
                line,
                col,
            })
        } else {
            let i: i64 = num_str
                .parse()
                .map_err(|_| self.error("Invalid integer literal"))?;
            Ok(Token {
                kind: TokenKind::Int(i),
                line,
                col,
            })
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let line = self.line;
        let col = self.col;
        let mut ident = String::new();

        while let Some(c) = self.current() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = keyword(&ident).unwrap_or(TokenKind::Ident(ident));
        Token { kind, line, col }
    }

    fn scan_operator(&mut self) -> Result<Token, LexerError> {
        let line = self.line;
        let col = self.col;
        let ch = match self.advance() {
            Some(c) => c,
            None => return Err(self.error("Unexpected end of input")),
        };

        let kind = match ch {
            '=' if self.current() == Some('=') => {
                self.advance();
                TokenKind::Eq
            }
            '!' if self.current() == Some('=') => {
                self.advance();
                TokenKind::Neq
            }
            '<' if self.current() == Some('=') => {
                self.advance();
                TokenKind::Lte
            }
            '>' if self.current() == Some('=') => {
                self.advance();
                TokenKind::Gte
            }
            '&' if self.current() == Some('&') => {
                self.advance();
                TokenKind::AndAnd
            }
            '|' if self.current() == Some('|') => {
                self.advance();
                TokenKind::OrOr
            }
            '=' => TokenKind::Assign,
            '!' => TokenKind::Bang,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semi,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            other => {
                return Err(LexerError::Error {
                    msg: format!("Unknown character: {:?}", other),
                    line,
                    col,
                })
            }
        };

        Ok(Token { kind, line, col })
    }
}

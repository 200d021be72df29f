//! Lexical analyzer

use std::iter::Peekable;
use std::rc::Rc;
use std::str::Chars;

use crate::diag::{FullParseError, ParseError, Position};
use crate::token::{Token, TokenKind};

/// Turn source text into a sequence of tokens.
pub struct Scanner<'s> {
    input: Peekable<Chars<'s>>,
    line: Position,

    // Buffer used when scanning longer tokens.  Allocated here to reuse memory.
    buf: String,
}

impl std::fmt::Debug for Scanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner").field("line", &self.line).finish()
    }
}

impl<'s> Scanner<'s> {
    /// Creates a new scanner operating on `source`.
    pub fn new(source: &'s str) -> Scanner<'s> {
        Scanner {
            input: source.chars().peekable(),
            line: 1,
            buf: String::new(),
        }
    }

    /// Scan the next token and return it.
    pub fn next_token(&mut self) -> Result<Token, FullParseError> {
        let kind = self.next_kind()?;
        Ok(Token { kind, line: self.line })
    }

    fn next_kind(&mut self) -> Result<TokenKind, FullParseError> {
        loop {
            match self.input.next() {
                None => return Ok(TokenKind::Eof),
                Some(ch) => match ch {
                    '\n' => self.line += 1,
                    ' ' | '\t' | '\r' => (),
                    '+' => return Ok(TokenKind::Plus),
                    '-' => return Ok(TokenKind::Minus),
                    '*' => return Ok(TokenKind::Star),
                    '/' => {
                        if let Some('/') = self.input.peek() {
                            self.skip_comment();
                        } else {
                            return Ok(TokenKind::Slash);
                        }
                    }
                    '(' => return Ok(TokenKind::LeftParen),
                    ')' => return Ok(TokenKind::RightParen),
                    '{' => return Ok(TokenKind::LeftCurly),
                    '}' => return Ok(TokenKind::RightCurly),
                    ';' => return Ok(TokenKind::Semicolon),
                    ',' => return Ok(TokenKind::Comma),
                    '<' => return Ok(self.one_or_two(TokenKind::Less, TokenKind::LessEqual)),
                    '>' => return Ok(self.one_or_two(TokenKind::Greater, TokenKind::GreaterEqual)),
                    '=' => return Ok(self.one_or_two(TokenKind::Equal, TokenKind::EqualEqual)),
                    '!' => return Ok(self.one_or_two(TokenKind::Bang, TokenKind::BangEqual)),
                    '"' => return self.scan_string(),
                    '0'..='9' => return self.scan_number(ch),
                    'a'..='z' | 'A'..='Z' | '_' => return Ok(self.scan_identifier(ch)),
                    _ => {
                        return Err(FullParseError {
                            line: self.line,
                            lexeme: Some(ch.to_string()),
                            error: ParseError::BadChar(ch),
                        });
                    }
                },
            };
        }
    }

    /// Pick the two-character token if the next character is `=`.
    fn one_or_two(&mut self, without_equal: TokenKind, with_equal: TokenKind) -> TokenKind {
        if let Some('=') = self.input.peek() {
            self.input.next();
            with_equal
        } else {
            without_equal
        }
    }

    fn scan_string(&mut self) -> Result<TokenKind, FullParseError> {
        self.buf.clear();
        loop {
            match self.input.next() {
                None => {
                    return Err(FullParseError {
                        line: self.line,
                        lexeme: None,
                        error: ParseError::UnterminatedString,
                    });
                }
                Some('"') => break,
                Some(ch) => {
                    // Strings may span lines.
                    if ch == '\n' {
                        self.line += 1;
                    }
                    self.buf.push(ch);
                }
            }
        }
        Ok(TokenKind::Str(Rc::from(self.buf.as_str())))
    }

    fn scan_number(&mut self, first_digit: char) -> Result<TokenKind, FullParseError> {
        self.buf.clear();
        self.buf.push(first_digit);
        loop {
            match self.input.peek() {
                Some(ch) if ch.is_ascii_digit() || *ch == '.' => {
                    let ch = *ch;
                    self.input.next();
                    self.buf.push(ch);
                }
                _ => break,
            }
        }

        let n = self.buf.parse::<f64>().map_err(|_| FullParseError {
            line: self.line,
            lexeme: Some(self.buf.clone()),
            error: ParseError::BadNumberLiteral(self.buf.clone()),
        })?;
        Ok(TokenKind::Number(n))
    }

    fn skip_comment(&mut self) {
        loop {
            match self.input.peek() {
                Some(ch) if *ch != '\n' => {
                    self.input.next();
                }
                _ => break,
            }
        }
    }

    fn scan_identifier(&mut self, first_char: char) -> TokenKind {
        self.buf.clear();
        self.buf.push(first_char);
        loop {
            match self.input.peek() {
                Some(ch) if ch.is_ascii_alphanumeric() || *ch == '_' => {
                    let ch = *ch;
                    self.input.next();
                    self.buf.push(ch);
                }
                _ => break,
            }
        }

        match keyword(&self.buf) {
            Some(kind) => kind,
            None => TokenKind::Identifier(Rc::from(self.buf.as_str())),
        }
    }
}

fn keyword(name: &str) -> Option<TokenKind> {
    let kind = match name {
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "print" => TokenKind::Print,
        "var" => TokenKind::Var,
        "nil" => TokenKind::Nil,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "fun" => TokenKind::Fun,
        "return" => TokenKind::Return,
        _ => return None,
    };
    Some(kind)
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, FullParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Token { kind: TokenKind::Eof, .. }) => None,
            Ok(t) => Some(Ok(t)),
            Err(e) => Some(Err(e)),
        }
    }
}

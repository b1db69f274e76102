use std::fmt;

use crate::token::{Position, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot continue or start a token here.
    UnexpectedChar(char),
    /// Input ended while a token was still open.
    UnexpectedEndOfLine,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar(ch) => write!(f, "Unexpected char {ch}"),
            Self::UnexpectedEndOfLine => write!(f, "Unexpected end of line"),
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe(.kind, .position))]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

fn describe(kind: &LexErrorKind, position: &Position) -> String {
    match kind {
        LexErrorKind::UnexpectedChar(_) => format!("{kind} at {position}"),
        LexErrorKind::UnexpectedEndOfLine => kind.to_string(),
    }
}

/// Tokenize an expression into a vector of tokens ending with `EOL`.
///
/// # Errors
///
/// Returns `LexError` at the first malformed construct.
pub fn tokenize(input: &str, with_source_map: bool) -> Result<Vec<Token>, LexError> {
    let lexer = if with_source_map {
        Lexer::with_source_map(input)
    } else {
        Lexer::new(input)
    };
    lexer.collect()
}

/// Pull-based tokenizer over a single expression.
///
/// Each call to [`Lexer::next_token`] yields one token. Once the input is
/// exhausted every further call yields another `EOL` token. The
/// [`Iterator`] implementation stops after the first `EOL` or error.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    col: usize,
    source_map: bool,
    after_colon: bool,
    finished: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 0,
            col: 0,
            source_map: false,
            after_colon: false,
            finished: false,
        }
    }

    /// Create a lexer that records the consumed source text on every token.
    #[must_use]
    pub const fn with_source_map(source: &'a str) -> Self {
        let mut lexer = Self::new(source);
        lexer.source_map = true;
        lexer
    }

    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Character starting at the given byte offset, if any.
    #[must_use]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.source.get(offset..).and_then(|rest| rest.chars().next())
    }

    /// Produce the next token.
    ///
    /// # Errors
    ///
    /// Returns `LexError` when an expected delimiter is missing or a
    /// character cannot start a token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let raw_start = self.pos;

        if self.after_colon && self.peek().is_some_and(is_space) {
            self.after_colon = false;
            let position = self.current_position();
            self.skip_whitespace();
            let run = self.source[raw_start..self.pos].to_string();
            return Ok(self.make_token(TokenKind::Space, run, raw_start, position));
        }

        self.skip_whitespace();
        let start = self.current_position();

        let Some(ch) = self.peek() else {
            return Ok(self.make_token(TokenKind::Eol, String::new(), raw_start, start));
        };

        let (kind, cargo) = match ch {
            '$' => self.read_dollar()?,
            '\'' => (TokenKind::Literal, self.read_literal()?),
            '-' | '0'..='9' => (TokenKind::Number, self.read_number()?),
            '[' => self.single(TokenKind::ArrayExpression),
            '{' => self.single(TokenKind::ObjectExpression),
            '(' => self.single(TokenKind::OpenParen),
            ')' => self.single(TokenKind::CloseParen),
            '}' => self.single(TokenKind::CloseBrace),
            ']' => self.single(TokenKind::CloseBracket),
            ',' => self.single(TokenKind::Comma),
            ':' => self.single(TokenKind::Colon),
            '=' => {
                self.advance();
                self.expect('=')?;
                (TokenKind::Comparison, "==".to_string())
            }
            '!' => {
                self.advance();
                if self.eat('=') {
                    (TokenKind::Comparison, "!=".to_string())
                } else {
                    (TokenKind::Not, "!".to_string())
                }
            }
            '<' | '>' => {
                self.advance();
                let mut op = ch.to_string();
                if self.eat('=') {
                    op.push('=');
                }
                (TokenKind::Comparison, op)
            }
            '&' | '|' => {
                self.advance();
                let mut op = ch.to_string();
                if self.eat(ch) {
                    op.push(ch);
                }
                (TokenKind::Logical, op)
            }
            other => return Err(self.error(LexErrorKind::UnexpectedChar(other))),
        };

        self.after_colon = kind == TokenKind::Colon;
        Ok(self.make_token(kind, cargo, raw_start, start))
    }

    fn make_token(
        &self,
        kind: TokenKind,
        cargo: String,
        raw_start: usize,
        position: Position,
    ) -> Token {
        let raw = self
            .source_map
            .then(|| self.source[raw_start..self.pos].to_string());
        Token {
            kind,
            cargo,
            raw,
            position,
        }
    }

    const fn current_position(&self) -> Position {
        Position {
            offset: self.pos,
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), LexError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(self.error(LexErrorKind::UnexpectedChar(ch))),
            None => Err(self.error(LexErrorKind::UnexpectedEndOfLine)),
        }
    }

    const fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            position: self.current_position(),
        }
    }

    fn single(&mut self, kind: TokenKind) -> (TokenKind, String) {
        let cargo = self.advance().map(String::from).unwrap_or_default();
        (kind, cargo)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.advance();
        }
    }

    fn read_name(&mut self) -> Result<String, LexError> {
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.advance();
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(ch) => self.error(LexErrorKind::UnexpectedChar(ch)),
                None => self.error(LexErrorKind::UnexpectedEndOfLine),
            });
        }
        Ok(self.source[start..self.pos].to_string())
    }

    /// `$name(`, `$(name)` or `$(name{`.
    fn read_dollar(&mut self) -> Result<(TokenKind, String), LexError> {
        self.advance(); // skip $

        if !self.eat('(') {
            let name = self.read_name()?;
            self.expect('(')?;
            return Ok((TokenKind::CallExpression, name));
        }

        let name = self.read_name()?;
        match self.peek() {
            Some(')') => {
                self.advance();
                Ok((TokenKind::Identifier, name))
            }
            Some('{') => {
                self.advance();
                Ok((TokenKind::MemberExpression, name))
            }
            Some(ch) => Err(self.error(LexErrorKind::UnexpectedChar(ch))),
            None => Err(self.error(LexErrorKind::UnexpectedEndOfLine)),
        }
    }

    fn read_literal(&mut self) -> Result<String, LexError> {
        if self.source[self.pos..].starts_with("'''") {
            for _ in 0..3 {
                self.advance();
            }
            let start = self.pos;
            while !self.source[self.pos..].starts_with("'''") {
                if self.advance().is_none() {
                    return Err(self.error(LexErrorKind::UnexpectedEndOfLine));
                }
            }
            // a longer run of quotes closes at its last three
            let run = self.source[self.pos..]
                .chars()
                .take_while(|&ch| ch == '\'')
                .count();
            for _ in 3..run {
                self.advance();
            }
            let value = self.source[start..self.pos].to_string();
            for _ in 0..3 {
                self.advance();
            }
            return Ok(value);
        }

        self.advance(); // skip opening quote
        let start = self.pos;
        loop {
            match self.peek() {
                Some('\'') => break,
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.error(LexErrorKind::UnexpectedEndOfLine)),
            }
        }
        let value = self.source[start..self.pos].to_string();
        self.advance(); // skip closing quote
        Ok(value)
    }

    fn read_number(&mut self) -> Result<String, LexError> {
        let start = self.pos;
        self.eat('-');
        match self.peek() {
            Some(ch) if ch.is_ascii_digit() => {}
            Some(ch) => return Err(self.error(LexErrorKind::UnexpectedChar(ch))),
            None => return Err(self.error(LexErrorKind::UnexpectedEndOfLine)),
        }
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
        }
        Ok(self.source[start..self.pos].to_string())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if !result
            .as_ref()
            .is_ok_and(|token| token.kind != TokenKind::Eol)
        {
            self.finished = true;
        }
        Some(result)
    }
}

const fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

const fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

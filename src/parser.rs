use std::fmt;

use crate::ast::{
    BinaryOperator, Identifier, LiteralValue, LogicalOperator, Node, ObjectProperty, Property,
    UnaryOperator,
};
use crate::lexer::{LexError, LexErrorKind, Lexer};
use crate::token::{Position, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The lexer rejected the input.
    Lex(LexErrorKind),
    /// A token that cannot appear here; carries its first source character.
    UnexpectedChar(char),
    /// Input ended before the expression was complete.
    UnexpectedEndOfLine,
    /// Numeric literal outside the signed 64-bit range.
    NumberOutOfRange(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(kind) => write!(f, "{kind}"),
            Self::UnexpectedChar(ch) => write!(f, "Unexpected char {ch}"),
            Self::UnexpectedEndOfLine => write!(f, "Unexpected end of line"),
            Self::NumberOutOfRange(text) => write!(f, "Number out of range {text}"),
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe(.kind, .position))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

fn describe(kind: &ParseErrorKind, position: &Position) -> String {
    match kind {
        ParseErrorKind::UnexpectedEndOfLine
        | ParseErrorKind::Lex(LexErrorKind::UnexpectedEndOfLine) => kind.to_string(),
        _ => format!("{kind} at {position}"),
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self {
            kind: ParseErrorKind::Lex(err.kind),
            position: err.position,
        }
    }
}

/// Parse an expression string into its AST.
///
/// # Errors
///
/// Returns `ParseError` when the lexer fails, when a token appears where it
/// is not allowed, or when tokens remain after a complete expression.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    tracing::trace!(input, "parsing esi expression");
    let result = Parser::new(Lexer::new(input)).and_then(Parser::parse);
    if let Err(err) = &result {
        tracing::debug!(input, error = %err, "esi expression rejected");
    }
    result
}

/// Deepest nesting of groups, lists, `!` and logical chains accepted.
pub const MAX_DEPTH: usize = 128;

/// Recursive-descent parser pulling tokens from a [`Lexer`] one at a time.
///
/// Precedence from lowest to highest: logical (`&`, `&&`, `|`, `||`,
/// right-associative), comparison (non-associative), unary `!`, primary.
/// Input nested deeper than [`MAX_DEPTH`] is rejected at the token that
/// opens the excess level.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Prime the parser with the first token of `lexer`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the first token cannot be lexed.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, ParseError> {
        let current = next_significant(&mut lexer)?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    /// Parse one complete expression, requiring the input to end after it.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` on any syntax error.
    pub fn parse(mut self) -> Result<Node, ParseError> {
        let node = self.parse_logical()?;
        if self.current.kind != TokenKind::Eol {
            return Err(self.unexpected());
        }
        Ok(node)
    }

    fn bump(&mut self) -> Result<Token, ParseError> {
        let next = next_significant(&mut self.lexer)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.current.kind == kind {
            self.bump()
        } else {
            Err(self.unexpected())
        }
    }

    /// Run `f` one nesting level deeper, starting at the current token.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.unexpected());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn unexpected(&self) -> ParseError {
        let position = self.current.position;
        let kind = if self.current.kind == TokenKind::Eol {
            ParseErrorKind::UnexpectedEndOfLine
        } else {
            let ch = self
                .lexer
                .char_at(position.offset)
                .or_else(|| self.current.cargo.chars().next())
                .unwrap_or(' ');
            ParseErrorKind::UnexpectedChar(ch)
        };
        ParseError { kind, position }
    }

    fn parse_logical(&mut self) -> Result<Node, ParseError> {
        let left = self.parse_comparison()?;
        if self.current.kind != TokenKind::Logical {
            return Ok(left);
        }
        let Some(operator) = LogicalOperator::from_symbol(&self.current.cargo) else {
            return Err(self.unexpected());
        };
        let right = self.nested(|p| {
            p.bump()?;
            p.parse_logical()
        })?;
        Ok(Node::LogicalExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        let left = self.parse_unary()?;
        if self.current.kind != TokenKind::Comparison {
            return Ok(left);
        }
        let Some(operator) = BinaryOperator::from_symbol(&self.current.cargo) else {
            return Err(self.unexpected());
        };
        self.bump()?;
        let right = self.parse_unary()?;
        // comparisons do not chain
        if self.current.kind == TokenKind::Comparison {
            return Err(self.unexpected());
        }
        Ok(Node::BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        if self.current.kind != TokenKind::Not {
            return self.parse_primary();
        }
        let argument = self.nested(|p| {
            p.bump()?;
            p.parse_unary()
        })?;
        Ok(Node::UnaryExpression {
            operator: UnaryOperator::Not,
            argument: Box::new(argument),
        })
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        match self.current.kind {
            TokenKind::OpenParen => self.nested(|p| {
                p.bump()?;
                let inner = p.parse_logical()?;
                p.expect(TokenKind::CloseParen)?;
                Ok(inner)
            }),
            TokenKind::Identifier => {
                let token = self.bump()?;
                Ok(Node::Identifier(Identifier { name: token.cargo }))
            }
            TokenKind::MemberExpression => self.parse_member(),
            TokenKind::CallExpression => self.nested(|p| {
                let token = p.bump()?;
                let arguments = p.parse_sequence(TokenKind::CloseParen)?;
                Ok(Node::CallExpression {
                    callee: Identifier { name: token.cargo },
                    arguments,
                })
            }),
            TokenKind::ArrayExpression => self.nested(|p| {
                p.bump()?;
                let elements = p.parse_sequence(TokenKind::CloseBracket)?;
                Ok(Node::ArrayExpression { elements })
            }),
            TokenKind::ObjectExpression => self.nested(Self::parse_object),
            TokenKind::Literal => {
                let token = self.bump()?;
                Ok(Node::Literal(LiteralValue::String(token.cargo)))
            }
            TokenKind::Number => {
                let value = self.parse_number()?;
                Ok(Node::Literal(LiteralValue::Number(value)))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_number(&mut self) -> Result<i64, ParseError> {
        let token = self.bump()?;
        token.cargo.parse().map_err(|_| ParseError {
            kind: ParseErrorKind::NumberOutOfRange(token.cargo.clone()),
            position: token.position,
        })
    }

    /// Remainder of `$(name{` ... `})`.
    fn parse_member(&mut self) -> Result<Node, ParseError> {
        let object = Identifier {
            name: self.bump()?.cargo,
        };
        let property = match self.current.kind {
            TokenKind::Literal => Property::Identifier(Identifier {
                name: self.bump()?.cargo,
            }),
            TokenKind::Number => Property::Index(self.parse_number()?),
            _ => return Err(self.unexpected()),
        };
        self.expect(TokenKind::CloseBrace)?;
        self.expect(TokenKind::CloseParen)?;
        Ok(Node::MemberExpression { object, property })
    }

    /// Comma-separated expressions up to and including `close`.
    fn parse_sequence(&mut self, close: TokenKind) -> Result<Vec<Node>, ParseError> {
        let mut items = Vec::new();
        if self.current.kind == close {
            self.bump()?;
            return Ok(items);
        }
        loop {
            items.push(self.parse_logical()?);
            if self.current.kind == TokenKind::Comma {
                self.bump()?;
            } else {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }

    fn parse_object(&mut self) -> Result<Node, ParseError> {
        self.bump()?; // skip {
        let mut properties = Vec::new();
        if self.current.kind == TokenKind::CloseBrace {
            self.bump()?;
            return Ok(Node::ObjectExpression { properties });
        }
        loop {
            let key = self.expect(TokenKind::Literal)?.cargo;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_logical()?;
            properties.push(ObjectProperty { key, value });
            if self.current.kind == TokenKind::Comma {
                self.bump()?;
            } else {
                self.expect(TokenKind::CloseBrace)?;
                return Ok(Node::ObjectExpression { properties });
            }
        }
    }
}

fn next_significant(lexer: &mut Lexer<'_>) -> Result<Token, ParseError> {
    loop {
        let token = lexer.next_token()?;
        if token.kind != TokenKind::Space {
            return Ok(token);
        }
    }
}

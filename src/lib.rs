//! Lexer, parser, and formatter for the Edge Side Includes expression
//! language.
//!
//! ESI attributes such as `test="..."` carry a small expression language:
//! variables `$(name)`, keyed lookups `$(name{'key'})`, function calls
//! `$name(...)`, string and number literals, array and object literals,
//! comparisons and boolean operators. This crate turns such text into a
//! typed AST and back. Evaluation against request data is left to callers.
//!
//! # Quick start
//!
//! ## Parse an expression
//!
//! ```
//! use esi_expr::{Node, parse_str};
//!
//! let ast = parse_str("$exists($(user_email))").unwrap();
//! assert_eq!(ast, Node::call("exists", vec![Node::identifier("user_email")]));
//! ```
//!
//! ## Format a tree back to text
//!
//! ```
//! use esi_expr::{Node, format};
//!
//! let ast = !Node::call("exists", vec![Node::member("HTTP_COOKIE", "remember_me")]);
//! assert_eq!(format(&ast), "!$exists($(HTTP_COOKIE{'remember_me'}))");
//! ```
//!
//! ## Inspect raw tokens
//!
//! ```
//! use esi_expr::tokenize;
//!
//! let tokens = tokenize("[1, 2]", true).unwrap();
//! let raw: String = tokens.iter().filter_map(|t| t.raw.as_deref()).collect();
//! assert_eq!(raw, "[1, 2]");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{
    BinaryOperator, Identifier, LiteralValue, LogicalOperator, Node, ObjectProperty, Property,
    UnaryOperator,
};
pub use formatter::format;
pub use lexer::{LexError, LexErrorKind, Lexer, tokenize};
pub use parser::{MAX_DEPTH, ParseError, ParseErrorKind, Parser, parse};
pub use token::{Position, Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Location the error points at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lex(err) => err.position,
            Self::Parse(err) => err.position,
        }
    }
}

/// Parse an expression string in one step.
///
/// Lexer failures surface as [`Error::Lex`]; everything the parser rejects
/// surfaces as [`Error::Parse`].
pub fn parse_str(input: &str) -> Result<Node, Error> {
    match parse(input) {
        Ok(node) => Ok(node),
        Err(ParseError {
            kind: ParseErrorKind::Lex(kind),
            position,
        }) => Err(Error::Lex(LexError { kind, position })),
        Err(err) => Err(Error::Parse(err)),
    }
}

use std::fmt;

/// Source location for error reporting, 0-indexed.
///
/// `offset` is the byte offset into the source text; `column` counts
/// characters from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `$name(`, opens a function call.
    CallExpression,
    /// `$(name)`, a complete variable reference.
    Identifier,
    /// `$(name{`, opens a member access.
    MemberExpression,
    /// `'text'` or `'''text'''`.
    Literal,
    /// Digits with an optional leading `-`.
    Number,
    /// `[` opening an array literal.
    ArrayExpression,
    /// `{` opening an object literal.
    ObjectExpression,
    /// Whitespace run following a `:`.
    Space,
    OpenParen,
    CloseParen,
    CloseBrace,
    CloseBracket,
    Comma,
    Colon,
    /// `==`, `!=`, `<`, `<=`, `>`, `>=`.
    Comparison,
    /// `&`, `|`, `&&`, `||`.
    Logical,
    /// `!`.
    Not,
    /// End of input.
    Eol,
}

impl TokenKind {
    /// Name of the token type as used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CallExpression => "CallExpression",
            Self::Identifier => "Identifier",
            Self::MemberExpression => "MemberExpression",
            Self::Literal => "Literal",
            Self::Number => "Number",
            Self::ArrayExpression => "ArrayExpression",
            Self::ObjectExpression => "ObjectExpression",
            Self::Space => "Space",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::CloseBrace => "}",
            Self::CloseBracket => "]",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Comparison => "BinaryOperator",
            Self::Logical => "LogicalOperator",
            Self::Not => "UnaryOperator",
            Self::Eol => "EOL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single token with its kind, decoded value, and source location.
///
/// `raw` is only populated when the lexer runs with a source map. It holds
/// the exact text consumed for this token, including any whitespace
/// absorbed since the previous token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub cargo: String,
    pub raw: Option<String>,
    pub position: Position,
}

use std::fmt;

/// Parsed ESI expression.
///
/// Nodes own their children outright; a tree is never shared or mutated
/// after the parser builds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// String or numeric literal.
    Literal(LiteralValue),
    /// Variable reference `$(name)`.
    Identifier(Identifier),
    /// Keyed access `$(name{'key'})` or `$(name{0})`.
    MemberExpression {
        object: Identifier,
        property: Property,
    },
    /// Function call `$name(args...)`.
    CallExpression {
        callee: Identifier,
        arguments: Vec<Self>,
    },
    /// Array literal `[a, b]`.
    ArrayExpression { elements: Vec<Self> },
    /// Object literal `{'key': value}`.
    ObjectExpression { properties: Vec<ObjectProperty> },
    /// Prefix operator application `!x`.
    UnaryExpression {
        operator: UnaryOperator,
        argument: Box<Self>,
    },
    /// Comparison `a == b`.
    BinaryExpression {
        operator: BinaryOperator,
        left: Box<Self>,
        right: Box<Self>,
    },
    /// Boolean combination `a & b`.
    LogicalExpression {
        operator: LogicalOperator,
        left: Box<Self>,
        right: Box<Self>,
    },
}

impl Node {
    /// Name of the node kind, e.g. `"CallExpression"`.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Literal(_) => "Literal",
            Self::Identifier(_) => "Identifier",
            Self::MemberExpression { .. } => "MemberExpression",
            Self::CallExpression { .. } => "CallExpression",
            Self::ArrayExpression { .. } => "ArrayExpression",
            Self::ObjectExpression { .. } => "ObjectExpression",
            Self::UnaryExpression { .. } => "UnaryExpression",
            Self::BinaryExpression { .. } => "BinaryExpression",
            Self::LogicalExpression { .. } => "LogicalExpression",
        }
    }
}

/// A bare name: variable, function, or member key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Literal payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    String(String),
    Number(i64),
}

/// Member key: a quoted name becomes an identifier, a number an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    Identifier(Identifier),
    Index(i64),
}

/// One `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectProperty {
    pub key: String,
    pub value: Node,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
}

impl UnaryOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Not => "!",
        }
    }

    /// Every unary operator in the language is written before its operand.
    #[must_use]
    pub const fn prefix(self) -> bool {
        match self {
            Self::Not => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl BinaryOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            "<" => Some(Self::Less),
            "<=" => Some(Self::LessOrEqual),
            ">" => Some(Self::Greater),
            ">=" => Some(Self::GreaterOrEqual),
            _ => None,
        }
    }
}

/// Logical operators. The single and doubled spellings share one
/// precedence level and are kept apart only so text can be reproduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `&`
    And,
    /// `&&`
    DoubleAnd,
    /// `|`
    Or,
    /// `||`
    DoubleOr,
}

impl LogicalOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "&",
            Self::DoubleAnd => "&&",
            Self::Or => "|",
            Self::DoubleOr => "||",
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "&" => Some(Self::And),
            "&&" => Some(Self::DoubleAnd),
            "|" => Some(Self::Or),
            "||" => Some(Self::DoubleOr),
            _ => None,
        }
    }

    /// True for `&` and `&&`.
    #[must_use]
    pub const fn is_conjunction(self) -> bool {
        matches!(self, Self::And | Self::DoubleAnd)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) if s.contains('\'') => write!(f, "'''{s}'''"),
            Self::String(s) => write!(f, "'{s}'"),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::formatter::format(self))
    }
}

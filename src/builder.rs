use std::ops::Not;

use crate::ast::{
    BinaryOperator, Identifier, LiteralValue, LogicalOperator, Node, ObjectProperty, Property,
    UnaryOperator,
};

impl Node {
    /// `$(name)`.
    #[must_use]
    pub fn identifier(name: &str) -> Self {
        Self::Identifier(Identifier::new(name))
    }

    /// String literal.
    #[must_use]
    pub fn string(value: &str) -> Self {
        Self::Literal(LiteralValue::String(value.to_string()))
    }

    /// Numeric literal.
    #[must_use]
    pub const fn number(value: i64) -> Self {
        Self::Literal(LiteralValue::Number(value))
    }

    /// `$(object{'key'})`.
    #[must_use]
    pub fn member(object: &str, key: &str) -> Self {
        Self::MemberExpression {
            object: Identifier::new(object),
            property: Property::Identifier(Identifier::new(key)),
        }
    }

    /// `$(object{index})`.
    #[must_use]
    pub fn member_index(object: &str, index: i64) -> Self {
        Self::MemberExpression {
            object: Identifier::new(object),
            property: Property::Index(index),
        }
    }

    /// `$callee(arguments...)`.
    #[must_use]
    pub fn call(callee: &str, arguments: Vec<Self>) -> Self {
        Self::CallExpression {
            callee: Identifier::new(callee),
            arguments,
        }
    }

    #[must_use]
    pub const fn array(elements: Vec<Self>) -> Self {
        Self::ArrayExpression { elements }
    }

    #[must_use]
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::ObjectExpression {
            properties: entries
                .into_iter()
                .map(|(key, value)| ObjectProperty {
                    key: key.into(),
                    value,
                })
                .collect(),
        }
    }

    /// Build a comparison with `self` on the left.
    #[must_use]
    pub fn compare(self, operator: BinaryOperator, right: Self) -> Self {
        Self::BinaryExpression {
            operator,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn equals(self, right: Self) -> Self {
        self.compare(BinaryOperator::Equal, right)
    }

    #[must_use]
    pub fn not_equals(self, right: Self) -> Self {
        self.compare(BinaryOperator::NotEqual, right)
    }

    #[must_use]
    pub fn less_than(self, right: Self) -> Self {
        self.compare(BinaryOperator::Less, right)
    }

    #[must_use]
    pub fn less_or_equal(self, right: Self) -> Self {
        self.compare(BinaryOperator::LessOrEqual, right)
    }

    #[must_use]
    pub fn greater_than(self, right: Self) -> Self {
        self.compare(BinaryOperator::Greater, right)
    }

    #[must_use]
    pub fn greater_or_equal(self, right: Self) -> Self {
        self.compare(BinaryOperator::GreaterOrEqual, right)
    }

    /// Build a logical expression with `self` on the left.
    #[must_use]
    pub fn logical(self, operator: LogicalOperator, right: Self) -> Self {
        Self::LogicalExpression {
            operator,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// `self & right`.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.logical(LogicalOperator::And, right)
    }

    /// `self | right`.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.logical(LogicalOperator::Or, right)
    }
}

impl Not for Node {
    type Output = Self;

    fn not(self) -> Self {
        Self::UnaryExpression {
            operator: UnaryOperator::Not,
            argument: Box::new(self),
        }
    }
}

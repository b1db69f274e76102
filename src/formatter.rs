//! Serializes an expression AST back into canonical ESI expression text.
//!
//! Output uses single spaces around operators, `, ` between list items, and
//! only the parentheses needed to reproduce the same tree when re-parsed.

use std::fmt::Write as _;

use crate::ast::{Identifier, LiteralValue, Node, Property};

/// Format a `Node` into expression text that parses back to the same tree.
///
/// String literals that contain a single quote are written in the
/// triple-quoted form; content containing `'''` has no textual form.
#[must_use]
pub fn format(node: &Node) -> String {
    let mut out = String::new();
    format_node(&mut out, node);
    out
}

fn format_node(out: &mut String, node: &Node) {
    match node {
        Node::Literal(value) => format_literal(out, value),
        Node::Identifier(id) => {
            let _ = write!(out, "$({})", id.name);
        }
        Node::MemberExpression { object, property } => {
            let _ = write!(out, "$({}{{", object.name);
            match property {
                Property::Identifier(Identifier { name }) => {
                    format_literal(out, &LiteralValue::String(name.clone()));
                }
                Property::Index(index) => {
                    let _ = write!(out, "{index}");
                }
            }
            out.push_str("})");
        }
        Node::CallExpression { callee, arguments } => {
            let _ = write!(out, "${}(", callee.name);
            format_list(out, arguments);
            out.push(')');
        }
        Node::ArrayExpression { elements } => {
            out.push('[');
            format_list(out, elements);
            out.push(']');
        }
        Node::ObjectExpression { properties } => {
            out.push('{');
            for (i, property) in properties.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                format_literal(out, &LiteralValue::String(property.key.clone()));
                out.push_str(": ");
                format_node(out, &property.value);
            }
            out.push('}');
        }
        Node::UnaryExpression { operator, argument } => {
            out.push_str(operator.as_str());
            format_operand(out, argument, is_infix(argument));
        }
        Node::BinaryExpression {
            operator,
            left,
            right,
        } => {
            format_operand(out, left, is_infix(left));
            let _ = write!(out, " {operator} ");
            format_operand(out, right, is_infix(right));
        }
        Node::LogicalExpression {
            operator,
            left,
            right,
        } => {
            // logical chains nest to the right, so only a left chain needs grouping
            let group_left = matches!(**left, Node::LogicalExpression { .. });
            format_operand(out, left, group_left);
            let _ = write!(out, " {operator} ");
            format_node(out, right);
        }
    }
}

fn format_literal(out: &mut String, value: &LiteralValue) {
    let _ = write!(out, "{value}");
}

fn format_list(out: &mut String, items: &[Node]) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        format_node(out, item);
    }
}

fn format_operand(out: &mut String, node: &Node, parenthesize: bool) {
    if parenthesize {
        out.push('(');
        format_node(out, node);
        out.push(')');
    } else {
        format_node(out, node);
    }
}

const fn is_infix(node: &Node) -> bool {
    matches!(
        node,
        Node::BinaryExpression { .. } | Node::LogicalExpression { .. }
    )
}

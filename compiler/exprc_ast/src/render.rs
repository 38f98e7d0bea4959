//! Textual forms of an expression tree.
//!
//! The canonical form (`Display`) parenthesizes every compound node. The
//! minimal form drops every pair of parentheses that precedence and
//! associativity make redundant.

use std::fmt;

use crate::ast::{precedence, Associativity, BinaryOperator, ExpressionNode};

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::Constant(value) => write!(f, "{value}"),
            ExpressionNode::Variable(name) => f.write_str(name),
            ExpressionNode::Negate(operand) => write!(f, "(-{operand})"),
            ExpressionNode::Binary(bin) => {
                write!(f, "({} {} {})", bin.left, bin.operator, bin.right)
            }
        }
    }
}

/// Minimally parenthesized rendering, obtained from [`ExpressionNode::minimal`].
#[derive(Debug, Clone, Copy)]
pub struct MinimalDisplay<'a>(&'a ExpressionNode);

impl ExpressionNode {
    pub fn minimal(&self) -> MinimalDisplay<'_> {
        MinimalDisplay(self)
    }

    pub fn to_min_string(&self) -> String {
        self.minimal().to_string()
    }
}

impl fmt::Display for MinimalDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ExpressionNode::Constant(_) | ExpressionNode::Variable(_) => write!(f, "{}", self.0),
            ExpressionNode::Negate(operand) => {
                f.write_str("-")?;
                write_operand(f, operand, operand.precedence() > precedence::NEGATE)
            }
            ExpressionNode::Binary(bin) => {
                let own = bin.operator.precedence();
                let left_parens = bin.left.precedence() > own;
                let right_parens = match bin.operator.associativity() {
                    Associativity::Associative => bin.right.precedence() > own,
                    Associativity::LeftOnly => bin.right.precedence() >= own,
                };
                write_operand(f, &bin.left, left_parens)?;
                write!(f, " {} ", bin.operator)?;
                write_operand(f, &bin.right, right_parens)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &ExpressionNode, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", operand.minimal())
    } else {
        write!(f, "{}", operand.minimal())
    }
}

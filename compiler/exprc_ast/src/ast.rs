// AST node definitions for exprc arithmetic expressions.
// Nodes own their children exclusively; trees are built once and never mutated.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Precedence ranks. Lower binds tighter and nests deeper.
pub mod precedence {
    /// Literals and variable references
    pub const LEAF: u8 = 0;
    /// Unary negation
    pub const NEGATE: u8 = 2;
    /// `*` and `/`
    pub const MULTIPLICATIVE: u8 = 3;
    /// `+` and `-`
    pub const ADDITIVE: u8 = 4;
}

/// Whether a right operand of equal precedence needs parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `+` and `*`: `a + (b + c)` may drop its parentheses
    Associative,
    /// `-` and `/`: `a - (b - c)` may not
    LeftOnly,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
pub enum ExpressionNode {
    Constant(f64),
    Variable(String),
    Negate(Box<ExpressionNode>),
    Binary(Box<BinaryExpressionNode>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryExpressionNode {
    pub left: ExpressionNode,
    pub operator: BinaryOperator,
    pub right: ExpressionNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Mul | BinaryOperator::Div => precedence::MULTIPLICATIVE,
            BinaryOperator::Add | BinaryOperator::Sub => precedence::ADDITIVE,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            BinaryOperator::Add | BinaryOperator::Mul => Associativity::Associative,
            BinaryOperator::Sub | BinaryOperator::Div => Associativity::LeftOnly,
        }
    }

    /// Apply the operator with IEEE semantics; division by zero is not an error.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOperator::Add => left + right,
            BinaryOperator::Sub => left - right,
            BinaryOperator::Mul => left * right,
            BinaryOperator::Div => left / right,
        }
    }
}

impl ExpressionNode {
    pub fn variable(name: impl Into<String>) -> Self {
        ExpressionNode::Variable(name.into())
    }

    pub fn negate(operand: ExpressionNode) -> Self {
        ExpressionNode::Negate(Box::new(operand))
    }

    pub fn binary(operator: BinaryOperator, left: ExpressionNode, right: ExpressionNode) -> Self {
        ExpressionNode::Binary(Box::new(BinaryExpressionNode {
            left,
            operator,
            right,
        }))
    }

    /// Precedence rank, determined by the variant alone.
    pub fn precedence(&self) -> u8 {
        match self {
            ExpressionNode::Constant(_) | ExpressionNode::Variable(_) => precedence::LEAF,
            ExpressionNode::Negate(_) => precedence::NEGATE,
            ExpressionNode::Binary(bin) => bin.operator.precedence(),
        }
    }

    /// Names of all referenced variables, sorted and deduplicated.
    pub fn free_variables(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names.into_iter().map(str::to_string).collect()
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            ExpressionNode::Constant(_) => {}
            ExpressionNode::Variable(name) => {
                names.insert(name.as_str());
            }
            ExpressionNode::Negate(operand) => operand.collect_variables(names),
            ExpressionNode::Binary(bin) => {
                bin.left.collect_variables(names);
                bin.right.collect_variables(names);
            }
        }
    }
}

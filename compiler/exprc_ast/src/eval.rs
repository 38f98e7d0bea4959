//! Numeric evaluation against a variable environment.

use exprc_env::Bindings;
use thiserror::Error;

use crate::ast::ExpressionNode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("cannot evaluate: variable '{0}' is undefined")]
    UndefinedVariable(String),
}

impl ExpressionNode {
    /// Evaluate the tree. Both operands of every binary node are evaluated;
    /// division by zero yields an IEEE infinity or NaN.
    pub fn evaluate<B: Bindings + ?Sized>(&self, env: &B) -> Result<f64, EvalError> {
        match self {
            ExpressionNode::Constant(value) => Ok(*value),
            ExpressionNode::Variable(name) => env.lookup(name).ok_or_else(|| {
                log::debug!("evaluation failed: '{name}' is not bound");
                EvalError::UndefinedVariable(name.clone())
            }),
            ExpressionNode::Negate(operand) => Ok(-operand.evaluate(env)?),
            ExpressionNode::Binary(bin) => {
                let left = bin.left.evaluate(env)?;
                let right = bin.right.evaluate(env)?;
                Ok(bin.operator.apply(left, right))
            }
        }
    }
}

use super::ast::{BinaryExpressionNode, ExpressionNode};

impl From<f64> for ExpressionNode {
    fn from(value: f64) -> Self {
        ExpressionNode::Constant(value)
    }
}

impl From<&str> for ExpressionNode {
    fn from(name: &str) -> Self {
        ExpressionNode::Variable(name.to_string())
    }
}

impl From<BinaryExpressionNode> for ExpressionNode {
    fn from(node: BinaryExpressionNode) -> Self {
        ExpressionNode::Binary(Box::new(node))
    }
}

//! Abstract Syntax Tree (AST) for exprc arithmetic expressions.
//!
//! This crate defines the closed set of expression nodes, their precedence
//! ranks and associativity classes, the two textual renderings (fully
//! parenthesized and minimally parenthesized) and numeric evaluation.

pub mod ast;
pub mod conversions;
pub mod eval;
pub mod render;

// Re-export commonly used types
pub use ast::{Associativity, BinaryExpressionNode, BinaryOperator, ExpressionNode};
pub use eval::EvalError;
pub use render::MinimalDisplay;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A result type for AST serialization.
#[cfg(feature = "serde")]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Serializes an AST node to a JSON string.
///
/// # Example
///
/// ```
/// use exprc_ast::ast::*;
/// use exprc_ast::to_json;
///
/// let expr = ExpressionNode::binary(
///     BinaryOperator::Add,
///     ExpressionNode::Constant(1.0),
///     ExpressionNode::variable("x"),
/// );
/// let json = to_json(&expr).unwrap();
///
/// assert!(json.contains(r#""type": "Binary""#));
/// assert!(json.contains(r#""operator": "Add""#));
/// assert!(json.contains(r#""value": "x""#));
/// ```
#[cfg(feature = "serde")]
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Deserializes an AST node from a JSON string.
#[cfg(feature = "serde")]
pub fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

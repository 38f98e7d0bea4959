//! Shared helpers for the workspace integration tests.

use exprc::{ExpressionNode, Result};
use exprc_env::VarEnv;

/// Build an environment from `(name, value)` pairs.
pub fn env(pairs: &[(&str, f64)]) -> VarEnv {
    pairs.iter().copied().collect()
}

/// Parse a line that is known to contain exactly one expression.
pub fn parse_one(line: &str) -> ExpressionNode {
    match exprc::parse(line) {
        Ok(Some(expr)) => expr,
        Ok(None) => panic!("{line:?} holds no expression"),
        Err(err) => panic!("{line:?} failed to parse: {err}"),
    }
}

pub fn eval_str(line: &str, env: &VarEnv) -> Result<f64> {
    exprc::evaluate(&parse_one(line), env)
}

pub fn canonical(line: &str) -> String {
    exprc::render_canonical(&parse_one(line))
}

pub fn minimal(line: &str) -> String {
    exprc::render_minimal(&parse_one(line))
}

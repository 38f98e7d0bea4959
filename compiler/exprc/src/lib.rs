//! Parse, render and evaluate arithmetic expressions.
//!
//! ```
//! use exprc_env::VarEnv;
//!
//! let expr = exprc::parse("2 * (x - 1)").unwrap().unwrap();
//! assert_eq!(exprc::render_canonical(&expr), "(2 * (x - 1))");
//! assert_eq!(exprc::render_minimal(&expr), "2 * (x - 1)");
//!
//! let env: VarEnv = [("x", 4.0)].into_iter().collect();
//! assert_eq!(exprc::evaluate(&expr, &env).unwrap(), 6.0);
//! ```

use exprc_env::Bindings;
use thiserror::Error;

pub mod batch;
pub mod config;
pub mod session;

pub use exprc_ast::{EvalError, ExpressionNode};
pub use exprc_lexer::LexError;
pub use exprc_parser::{ParseError, ParseStrategy, ParserConfig};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse one line with the default parser settings.
///
/// `Ok(None)` means the line held no expression.
pub fn parse(line: &str) -> Result<Option<ExpressionNode>> {
    parse_with(line, ParserConfig::default())
}

/// Lexer failures surface as [`Error::Lex`], everything else as [`Error::Parse`].
pub fn parse_with(line: &str, config: ParserConfig) -> Result<Option<ExpressionNode>> {
    exprc_parser::parse_line(line, config).map_err(|err| match err {
        ParseError::Lex(err) => Error::Lex(err),
        other => Error::Parse(other),
    })
}

/// Fully parenthesized form, e.g. `(1 + (2 * 3))`.
pub fn render_canonical(expr: &ExpressionNode) -> String {
    expr.to_string()
}

/// Shortest form that keeps the tree's meaning, e.g. `1 + 2 * 3`.
pub fn render_minimal(expr: &ExpressionNode) -> String {
    expr.to_min_string()
}

pub fn evaluate<B: Bindings + ?Sized>(expr: &ExpressionNode, env: &B) -> Result<f64> {
    Ok(expr.evaluate(env)?)
}

/// The three outputs for one expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub canonical: String,
    pub minimal: String,
    pub value: Result<f64>,
}

impl Report {
    pub fn new<B: Bindings + ?Sized>(expr: &ExpressionNode, env: &B) -> Self {
        Report {
            canonical: render_canonical(expr),
            minimal: render_minimal(expr),
            value: evaluate(expr, env),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.value.is_ok()
    }

    /// One line each; an evaluation failure replaces only the value line.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.canonical.clone(),
            self.minimal.clone(),
            value_line(&self.value),
        ]
    }
}

fn value_line(value: &Result<f64>) -> String {
    match value {
        Ok(value) => value.to_string(),
        Err(err) => format!("error: {err}"),
    }
}

//! Turning token sequences into expression trees.
//!
//! Two strategies are available. [`ParseStrategy::SortedPass`] resolves tokens
//! in order of precedence rank and merges neighbouring subtrees; it is the
//! default. [`ParseStrategy::PrecedenceClimbing`] is a conventional recursive
//! parser kept as a cross-check. Both produce identical trees for valid input.

use std::fmt;
use std::str::FromStr;

use exprc_ast::ExpressionNode;
use exprc_lexer::{tokenize_line, Token};
use log::{debug, trace};

pub mod climbing;
pub mod diagnostics;
pub mod error;
pub mod token_slice;
pub mod tree_builder;

#[doc(hidden)]
pub mod test_utils;

pub use diagnostics::{render_snippet, Diagnostic, Severity};
pub use error::ParseError;
pub use token_slice::TokenSlice;
pub use tree_builder::TreeBuilder;

/// Which algorithm builds the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseStrategy {
    #[default]
    SortedPass,
    PrecedenceClimbing,
}

impl FromStr for ParseStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sorted" | "sorted-pass" => Ok(ParseStrategy::SortedPass),
            "climbing" | "precedence-climbing" => Ok(ParseStrategy::PrecedenceClimbing),
            other => Err(format!(
                "unknown parse strategy '{other}' (expected 'sorted' or 'climbing')"
            )),
        }
    }
}

impl fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStrategy::SortedPass => write!(f, "sorted"),
            ParseStrategy::PrecedenceClimbing => write!(f, "climbing"),
        }
    }
}

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    pub strategy: ParseStrategy,
}

impl ParserConfig {
    pub fn with_strategy(strategy: ParseStrategy) -> Self {
        ParserConfig { strategy }
    }
}

/// Build a tree from tokens using the default strategy.
pub fn parse_tokens(tokens: &[Token]) -> Result<ExpressionNode, ParseError> {
    parse_tokens_with(tokens, ParserConfig::default())
}

pub fn parse_tokens_with(
    tokens: &[Token],
    config: ParserConfig,
) -> Result<ExpressionNode, ParseError> {
    trace!("parsing {} tokens with {}", tokens.len(), config.strategy);
    match config.strategy {
        ParseStrategy::SortedPass => TreeBuilder::new(tokens).build(),
        ParseStrategy::PrecedenceClimbing => climbing::parse_all(tokens),
    }
}

/// Tokenize and parse one line of source.
///
/// Returns `Ok(None)` when the line holds no expression at all.
pub fn parse_line(line: &str, config: ParserConfig) -> Result<Option<ExpressionNode>, ParseError> {
    let Some(tokens) = tokenize_line(line)? else {
        debug!("no expression in {line:?}");
        return Ok(None);
    };
    parse_tokens_with(&tokens, config).map(Some)
}

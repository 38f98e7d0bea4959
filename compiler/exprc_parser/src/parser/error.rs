use exprc_lexer::{LexError, Location, Token};
use thiserror::Error;

/// Why a line could not be turned into an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("empty expression")]
    EmptyExpression,

    #[error("unmatched '(' at {0}")]
    UnmatchedOpenParen(Location),

    #[error("unmatched ')' at {0}")]
    UnmatchedCloseParen(Location),

    #[error("empty parentheses at {0}")]
    EmptyParentheses(Location),

    #[error("operator '{operator}' at {location} is missing an operand")]
    MissingOperand { operator: String, location: Location },

    #[error("expected an operator before '{lexeme}' at {location}")]
    MissingOperator { lexeme: String, location: Location },
}

impl ParseError {
    pub(crate) fn missing_operand(token: &Token) -> Self {
        ParseError::MissingOperand {
            operator: token.lexeme.clone(),
            location: token.location,
        }
    }

    pub(crate) fn missing_operator(token: &Token) -> Self {
        ParseError::MissingOperator {
            lexeme: token.lexeme.clone(),
            location: token.location,
        }
    }

    /// Source location the error points at, if any.
    pub fn location(&self) -> Option<Location> {
        match self {
            ParseError::Lex(err) => Some(err.location()),
            ParseError::EmptyExpression => None,
            ParseError::UnmatchedOpenParen(location)
            | ParseError::UnmatchedCloseParen(location)
            | ParseError::EmptyParentheses(location) => Some(*location),
            ParseError::MissingOperand { location, .. }
            | ParseError::MissingOperator { location, .. } => Some(*location),
        }
    }
}

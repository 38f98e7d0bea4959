//! Errors raised while scanning expression text.

use crate::token::Location;
use thiserror::Error;

/// Failure to turn a line of text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character outside the recognised set was found.
    #[error("malformed input: unexpected character {character:?} at {location}")]
    MalformedInput {
        /// The offending character
        character: char,
        /// Where it was found
        location: Location,
    },
}

impl LexError {
    /// Source location the error points at.
    pub fn location(&self) -> Location {
        match self {
            LexError::MalformedInput { location, .. } => *location,
        }
    }
}

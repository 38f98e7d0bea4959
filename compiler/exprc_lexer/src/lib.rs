//! exprc lexical analyzer
//!
//! Converts one line of arithmetic text into the flat token sequence consumed
//! by the tree builder. Input is split into logical expressions at line breaks
//! and `;`, and a `-` is classified as unary negation or binary subtraction by
//! looking at the token before it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod lexer;
pub mod logos_token;
pub mod token;

// Re-export the main types for convenience
pub use error::LexError;
pub use lexer::{tokenize_line, Lexer};
pub use logos_token::LogosToken;
pub use token::{Location, Token, TokenType};

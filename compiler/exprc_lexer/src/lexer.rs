//! Expression-at-a-time lexer built on the logos scanner.

use logos::Logos;

use crate::error::LexError;
use crate::logos_token::LogosToken;
use crate::token::{Location, Token, TokenType};

/// Splits source text into one token sequence per logical expression.
///
/// A line break or `;` ends an expression. Each call to
/// [`next_expression`](Lexer::next_expression) consumes exactly one
/// expression's worth of text.
pub struct Lexer<'a> {
    /// The source being lexed
    source: &'a str,
    /// The inner logos lexer
    inner: logos::Lexer<'a, LogosToken>,
    /// Current line number (1-based)
    line: usize,
    /// Current column number (1-based)
    column: usize,
    /// Byte offset that `line`/`column` describe
    offset: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: LogosToken::lexer(source),
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Advance position tracking to `target` and return its location.
    ///
    /// Columns count characters, not bytes.
    fn sync_position_to(&mut self, target: usize) -> Location {
        let text = &self.source[self.offset..target];
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = target;
        Location {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    /// Read the tokens of the next logical expression.
    ///
    /// Returns `Ok(None)` once the input is exhausted and no token was read.
    /// A blank line yields `Ok(Some(vec![]))`. On a malformed character the
    /// rest of that expression is discarded so the following call starts at
    /// the next one.
    pub fn next_expression(&mut self) -> Result<Option<Vec<Token>>, LexError> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut saw_anything = false;

        while let Some(raw) = self.inner.next() {
            saw_anything = true;
            let span = self.inner.span();
            let lexeme = self.inner.slice();
            let location = self.sync_position_to(span.start);

            let raw = match raw {
                Ok(raw) => raw,
                Err(()) => {
                    let character = lexeme.chars().next().unwrap_or('\u{fffd}');
                    #[cfg(feature = "logging")]
                    log::debug!("malformed input {character:?} at {location}");
                    self.skip_to_expression_end();
                    return Err(LexError::MalformedInput {
                        character,
                        location,
                    });
                }
            };

            let token_type = match raw {
                LogosToken::Newline | LogosToken::Semicolon => return Ok(Some(tokens)),
                // Assignment syntax is reserved; the evaluator has no use for it
                LogosToken::Equal => continue,
                LogosToken::Number(value) => TokenType::Number(value),
                LogosToken::Identifier(name) => TokenType::Identifier(name),
                LogosToken::Plus => TokenType::Add,
                LogosToken::Minus => classify_minus(tokens.last()),
                LogosToken::Star => TokenType::Multiply,
                LogosToken::Slash => TokenType::Divide,
                LogosToken::LeftParen => TokenType::LeftParen,
                LogosToken::RightParen => TokenType::RightParen,
            };

            #[cfg(feature = "logging")]
            log::trace!("token {token_type:?} '{lexeme}' at {location}");
            tokens.push(Token::new(token_type, lexeme, location));
        }

        if !saw_anything {
            return Ok(None);
        }
        Ok(Some(tokens))
    }

    /// Discard input up to and including the next expression terminator.
    fn skip_to_expression_end(&mut self) {
        while let Some(raw) = self.inner.next() {
            if matches!(raw, Ok(LogosToken::Newline | LogosToken::Semicolon)) {
                break;
            }
        }
    }
}

/// A `-` is negation at the start of an expression or after an operator or
/// `(`; everywhere else it is subtraction.
fn classify_minus(previous: Option<&Token>) -> TokenType {
    match previous.map(|t| &t.token_type) {
        None => TokenType::Negate,
        Some(tt) if tt.is_operator() || *tt == TokenType::LeftParen => TokenType::Negate,
        Some(_) => TokenType::Subtract,
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Vec<Token>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_expression().transpose()
    }
}

/// Tokenize the first logical expression in `line`.
///
/// `Ok(None)` means there was nothing to parse.
pub fn tokenize_line(line: &str) -> Result<Option<Vec<Token>>, LexError> {
    match Lexer::new(line).next_expression()? {
        Some(tokens) if tokens.is_empty() => Ok(None),
        other => Ok(other),
    }
}

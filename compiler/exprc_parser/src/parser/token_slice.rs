use exprc_lexer::Token;

/// A cursor over a borrowed token sequence, used as nom parser input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSlice<'a>(pub &'a [Token]);

impl<'a> TokenSlice<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        TokenSlice(tokens)
    }

    /// The current token without advancing.
    pub fn peek(&self) -> Option<&'a Token> {
        self.0.first()
    }

    /// The slice with its first token consumed.
    pub fn advance(&self) -> Self {
        match self.0.split_first() {
            Some((_, rest)) => TokenSlice(rest),
            None => *self,
        }
    }
}

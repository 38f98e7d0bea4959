use exprc_lexer::{tokenize_line, Location, Token, TokenType};

/// Tokenize a single well-formed line, panicking on lexer errors.
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_line(source)
        .expect("test source should tokenize")
        .unwrap_or_default()
}

pub fn create_token(token_type: TokenType, lexeme: &str, column: usize) -> Token {
    Token::new(
        token_type,
        lexeme,
        Location {
            line: 1,
            column,
            offset: column - 1,
        },
    )
}

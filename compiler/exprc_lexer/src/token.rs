use std::fmt;

/// Represents a token's location in the source text.
///
/// Line and column are 1-based; the offset is a 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// The 1-based line number
    pub line: usize,
    /// The 1-based column number, counted in characters
    pub column: usize,
    /// The 0-based byte offset from the start of the source
    pub offset: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Kind of a lexical unit in an arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    /// Numeric literal with its parsed value
    Number(f64),
    /// Variable name
    Identifier(String),
    /// Binary `+`
    Add,
    /// Binary `-`
    Subtract,
    /// Unary `-`
    Negate,
    /// Binary `*`
    Multiply,
    /// Binary `/`
    Divide,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
}

impl TokenType {
    /// True for the arithmetic operators, unary or binary.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenType::Add
                | TokenType::Subtract
                | TokenType::Negate
                | TokenType::Multiply
                | TokenType::Divide
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Number(n) => write!(f, "{n}"),
            TokenType::Identifier(name) => write!(f, "{name}"),
            TokenType::Add => write!(f, "+"),
            TokenType::Subtract | TokenType::Negate => write!(f, "-"),
            TokenType::Multiply => write!(f, "*"),
            TokenType::Divide => write!(f, "/"),
            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
        }
    }
}

/// A token with its source text and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The classified token kind
    pub token_type: TokenType,
    /// The exact source text of the token
    pub lexeme: String,
    /// Where the token starts
    pub location: Location,
}

impl Token {
    /// Create a new token.
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, location: Location) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

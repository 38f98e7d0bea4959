use logos::Logos;

/// Raw token produced by the logos scanner.
///
/// `-` is not classified here; the [`Lexer`](crate::Lexer) decides between
/// negation and subtraction from the surrounding tokens.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\x0B\x0C\r]+")]
pub enum LogosToken {
    /// Decimal literal with optional fraction and exponent (`3`, `2.5`, `.5`, `1e3`).
    /// Literals that overflow `f64` are rejected.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", finite_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", finite_number)]
    Number(f64),

    /// Variable name: a letter followed by letters or digits
    #[regex(r"[A-Za-z][A-Za-z0-9]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Operators
    /// `+`
    #[token("+")]
    Plus,
    /// `-`, either negation or subtraction
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`, reserved for assignment and dropped by the lexer
    #[token("=")]
    Equal,

    // Delimiters
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `;` ends the current expression
    #[token(";")]
    Semicolon,
    /// A line break ends the current expression
    #[regex(r"\r?\n")]
    Newline,
}

fn finite_number(lex: &mut logos::Lexer<LogosToken>) -> Option<f64> {
    lex.slice().parse::<f64>().ok().filter(|value| value.is_finite())
}

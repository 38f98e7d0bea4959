//! User-facing error reports with a source excerpt.

use std::fmt;

use exprc_lexer::{LexError, Location};

use super::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<Location>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        let help = match error {
            ParseError::Lex(LexError::MalformedInput { .. }) => {
                "expressions may only contain numbers, names, + - * / and parentheses"
            }
            ParseError::EmptyExpression => "write an expression such as `1 + x`",
            ParseError::UnmatchedOpenParen(_) => "add a closing ')'",
            ParseError::UnmatchedCloseParen(_) => "remove this ')' or add a matching '('",
            ParseError::EmptyParentheses(_) => "put an expression between the parentheses",
            ParseError::MissingOperand { .. } => "this operator needs a value on each side",
            ParseError::MissingOperator { .. } => "insert an operator between the two values",
        };

        let diagnostic = Diagnostic::error(error.to_string()).with_help(help);
        match error.location() {
            Some(location) => diagnostic.at(location),
            None => diagnostic,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Render the diagnostic with the offending source line and a caret under the
/// reported column.
pub fn render_snippet(diagnostic: &Diagnostic, source: &str) -> String {
    let mut out = diagnostic.to_string();

    if let Some(location) = diagnostic.location {
        if let Some(line) = source.lines().nth(location.line.saturating_sub(1)) {
            let gutter = location.line.to_string();
            let pad = " ".repeat(gutter.len());
            let caret = " ".repeat(location.column.saturating_sub(1));
            out.push_str(&format!("\n{pad} --> {location}"));
            out.push_str(&format!("\n{pad} |"));
            out.push_str(&format!("\n{gutter} | {line}"));
            out.push_str(&format!("\n{pad} | {caret}^"));
        }
    }

    if let Some(help) = &diagnostic.help {
        out.push_str(&format!("\n  = help: {help}"));
    }
    out
}

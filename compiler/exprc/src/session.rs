//! Line-oriented command session.
//!
//! | command        | effect                                   |
//! |----------------|------------------------------------------|
//! | `V name value` | bind a variable                          |
//! | `E expr`       | store an expression and print its index  |
//! | `S i`          | print the canonical form of expression i |
//! | `M i`          | print the minimal form                   |
//! | `C i`          | print the value                          |
//! | `F i`          | print all three                          |
//!
//! Any other command ends the session. Blank lines are ignored.

use exprc_ast::ExpressionNode;
use exprc_env::VarEnv;
use exprc_parser::{ParseError, ParserConfig};
use log::debug;

use crate::{evaluate, render_canonical, render_minimal, Report};

#[derive(Debug, Default)]
pub struct Session {
    config: ParserConfig,
    env: VarEnv,
    expressions: Vec<ExpressionNode>,
    errors: usize,
}

impl Session {
    pub fn new(config: ParserConfig) -> Self {
        Session {
            config,
            ..Session::default()
        }
    }

    pub fn prompt(&self) -> &'static str {
        "exprc> "
    }

    /// Number of commands that produced an error line.
    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn env(&self) -> &VarEnv {
        &self.env
    }

    pub fn expressions(&self) -> &[ExpressionNode] {
        &self.expressions
    }

    /// Handle one command line. Returns the lines to print and whether the
    /// session should end.
    pub fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Vec::new(), false);
        }

        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };
        debug!("session command {command:?} {rest:?}");

        let out = match command {
            "V" => self.bind(rest),
            "E" => self.store(rest),
            "S" | "M" | "C" | "F" => self.show(command, rest),
            _ => return (Vec::new(), true),
        };

        match out {
            Ok(lines) => (lines, false),
            Err(message) => {
                self.errors += 1;
                (vec![format!("error: {message}")], false)
            }
        }
    }

    fn bind(&mut self, args: &str) -> Result<Vec<String>, String> {
        let mut fields = args.split_whitespace();
        let (Some(name), Some(value), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err("usage: V <name> <value>".to_string());
        };
        if !name.starts_with(|c: char| c.is_ascii_alphabetic())
            || !name.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(format!("invalid variable name '{name}'"));
        }
        let value: f64 = value
            .parse()
            .map_err(|_| format!("invalid value '{value}' for '{name}'"))?;
        self.env.insert(name, value);
        Ok(Vec::new())
    }

    fn store(&mut self, source: &str) -> Result<Vec<String>, String> {
        let expr = exprc_parser::parse_line(source, self.config)
            .map_err(|err| err.to_string())?
            .ok_or_else(|| ParseError::EmptyExpression.to_string())?;
        self.expressions.push(expr);
        Ok(vec![(self.expressions.len() - 1).to_string()])
    }

    fn show(&mut self, command: &str, args: &str) -> Result<Vec<String>, String> {
        let index: usize = args
            .parse()
            .map_err(|_| format!("usage: {command} <index>"))?;
        let expr = self
            .expressions
            .get(index)
            .ok_or_else(|| format!("no expression at index {index}"))?;

        match command {
            "S" => Ok(vec![render_canonical(expr)]),
            "M" => Ok(vec![render_minimal(expr)]),
            "C" => evaluate(expr, &self.env)
                .map(|value| vec![value.to_string()])
                .map_err(|err| err.to_string()),
            _ => {
                let report = Report::new(expr, &self.env);
                if !report.is_ok() {
                    self.errors += 1;
                }
                Ok(report.lines())
            }
        }
    }
}

//! The batch input format.
//!
//! ```text
//! <n>
//! <name> <value>     (n times, any whitespace between fields)
//! <m>
//! <expression>       (m non-blank lines)
//! ```
//!
//! Every expression produces its canonical form, minimal form and value.

use exprc_env::VarEnv;
use exprc_parser::{ParseError, ParserConfig};
use log::{debug, info};
use nom::{
    character::complete::{alpha1, alphanumeric0, digit1, multispace0, multispace1},
    combinator::{map_res, recognize},
    multi::count,
    number::complete::double,
    sequence::{pair, preceded},
    IResult,
};
use thiserror::Error;

use crate::Report;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("malformed batch header near {0:?}")]
    Header(String),

    #[error("expected {expected} expression lines, found {found}")]
    MissingExpressions { expected: usize, found: usize },
}

/// Variable bindings and the number of expressions that follow.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchHeader {
    pub variables: Vec<(String, f64)>,
    pub expressions: usize,
}

/// Lines to print, and how many expressions failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutput {
    pub lines: Vec<String>,
    pub failures: usize,
}

fn count_field(input: &str) -> IResult<&str, usize> {
    preceded(multispace0, map_res(digit1, str::parse))(input)
}

fn variable_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(alpha1, alphanumeric0))(input)
}

fn binding(input: &str) -> IResult<&str, (String, f64)> {
    let (input, name) = preceded(multispace0, variable_name)(input)?;
    let (input, value) = preceded(multispace1, double)(input)?;
    Ok((input, (name.to_string(), value)))
}

fn header(input: &str) -> IResult<&str, BatchHeader> {
    let (input, n) = count_field(input)?;
    let (input, variables) = count(binding, n)(input)?;
    let (input, expressions) = count_field(input)?;
    Ok((
        input,
        BatchHeader {
            variables,
            expressions,
        },
    ))
}

/// Split the input into its header and the text after the expression count.
pub fn parse_header(source: &str) -> Result<(BatchHeader, &str), BatchError> {
    match header(source) {
        Ok((rest, header)) => Ok((header, rest)),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            let near: String = e.input.chars().take(16).collect();
            Err(BatchError::Header(near))
        }
        Err(nom::Err::Incomplete(_)) => Err(BatchError::Header(String::new())),
    }
}

/// Run every expression of a batch and collect the output.
pub fn run_batch(source: &str, config: ParserConfig) -> Result<BatchOutput, BatchError> {
    let (header, rest) = parse_header(source)?;
    let env: VarEnv = header.variables.into_iter().collect();
    info!(
        "batch: {} variables, {} expressions",
        env.len(),
        header.expressions
    );

    // The count line itself may carry trailing text; it is not an expression
    let lines: Vec<&str> = rest
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .take(header.expressions)
        .collect();
    if lines.len() < header.expressions {
        return Err(BatchError::MissingExpressions {
            expected: header.expressions,
            found: lines.len(),
        });
    }

    let mut output = BatchOutput::default();
    for line in lines {
        debug!("batch expression: {line}");
        match exprc_parser::parse_line(line, config) {
            Ok(Some(expr)) => {
                let report = Report::new(&expr, &env);
                if !report.is_ok() {
                    output.failures += 1;
                }
                output.lines.extend(report.lines());
            }
            Ok(None) => {
                output.failures += 1;
                output.lines.push(format!("error: {}", ParseError::EmptyExpression));
            }
            Err(err) => {
                output.failures += 1;
                output.lines.push(format!("error: {err}"));
            }
        }
    }
    Ok(output)
}

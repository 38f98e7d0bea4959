//! Precedence-climbing parser over a token slice.
//!
//! Produces the same trees as the sorted-pass [`TreeBuilder`](super::tree_builder::TreeBuilder)
//! and serves as an independent cross-check of it.

use exprc_ast::ast::{precedence, BinaryOperator, ExpressionNode};
use exprc_lexer::{Token, TokenType};
use nom::IResult;

use super::error::ParseError;
use super::token_slice::TokenSlice;
use super::tree_builder::binary_operator;

type ClimbResult<'a, O> = IResult<TokenSlice<'a>, O, ParseError>;

fn fail<'a, O>(error: ParseError) -> ClimbResult<'a, O> {
    Err(nom::Err::Failure(error))
}

/// Binding power: higher binds tighter. Derived from the shared precedence
/// ranks so both strategies agree.
fn binding_power(operator: BinaryOperator) -> u8 {
    precedence::ADDITIVE + 1 - operator.precedence()
}

/// Parse an entire token sequence as a single expression.
pub fn parse_all(tokens: &[Token]) -> Result<ExpressionNode, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    let (rest, expr) = parse_binary(TokenSlice::new(tokens), 0, None).map_err(|err| match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e,
        nom::Err::Incomplete(_) => ParseError::EmptyExpression,
    })?;

    match rest.peek() {
        None => Ok(expr),
        Some(token) if token.token_type == TokenType::RightParen => {
            Err(ParseError::UnmatchedCloseParen(token.location))
        }
        Some(token) => Err(ParseError::missing_operator(token)),
    }
}

/// Parse a chain of binary operators whose binding power is at least
/// `min_power`. `after` is the operator that demanded this operand, if any.
pub fn parse_binary<'a>(
    input: TokenSlice<'a>,
    min_power: u8,
    after: Option<&'a Token>,
) -> ClimbResult<'a, ExpressionNode> {
    let (mut input, mut left) = parse_unary(input, after)?;

    while let Some(token) = input.peek() {
        let Some(operator) = binary_operator(&token.token_type) else {
            break;
        };
        let power = binding_power(operator);
        if power < min_power {
            break;
        }

        // Left associative: the right side only takes tighter operators
        let (rest, right) = parse_binary(input.advance(), power + 1, Some(token))?;
        input = rest;
        left = ExpressionNode::binary(operator, left, right);
    }

    Ok((input, left))
}

fn parse_unary<'a>(
    input: TokenSlice<'a>,
    after: Option<&'a Token>,
) -> ClimbResult<'a, ExpressionNode> {
    match input.peek() {
        Some(token) if token.token_type == TokenType::Negate => {
            let (rest, operand) = parse_unary(input.advance(), Some(token))?;
            Ok((rest, ExpressionNode::negate(operand)))
        }
        _ => parse_primary(input, after),
    }
}

fn parse_primary<'a>(
    input: TokenSlice<'a>,
    after: Option<&'a Token>,
) -> ClimbResult<'a, ExpressionNode> {
    let Some(token) = input.peek() else {
        return match after {
            Some(operator) => fail(ParseError::missing_operand(operator)),
            None => fail(ParseError::EmptyExpression),
        };
    };

    match &token.token_type {
        TokenType::Number(value) => Ok((input.advance(), ExpressionNode::Constant(*value))),
        TokenType::Identifier(name) => {
            Ok((input.advance(), ExpressionNode::Variable(name.clone())))
        }
        TokenType::LeftParen => parse_group(input, token),
        TokenType::RightParen => match after {
            Some(operator) => fail(ParseError::missing_operand(operator)),
            None => fail(ParseError::UnmatchedCloseParen(token.location)),
        },
        _ => fail(ParseError::missing_operand(token)),
    }
}

fn parse_group<'a>(input: TokenSlice<'a>, open: &'a Token) -> ClimbResult<'a, ExpressionNode> {
    let inner = input.advance();
    if matches!(inner.peek(), Some(t) if t.token_type == TokenType::RightParen) {
        return fail(ParseError::EmptyParentheses(open.location));
    }

    let (rest, expr) = parse_binary(inner, 0, None)?;
    match rest.peek() {
        Some(token) if token.token_type == TokenType::RightParen => Ok((rest.advance(), expr)),
        Some(token) => fail(ParseError::missing_operator(token)),
        None => fail(ParseError::UnmatchedOpenParen(open.location)),
    }
}

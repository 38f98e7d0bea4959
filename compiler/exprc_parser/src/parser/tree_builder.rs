//! Priority-driven tree construction.
//!
//! Instead of descending through grammar rules, the builder visits the tokens
//! of a range in order of ascending precedence rank (parentheses first, then
//! leaves, negation, `* /`, `+ -`). Each operator merges the subtrees that
//! currently represent its neighbouring tokens. Which token represents a merged
//! subtree is tracked with a union-find over token indices.

use exprc_ast::ast::{precedence, BinaryOperator, ExpressionNode};
use exprc_lexer::{Token, TokenType};

use super::error::ParseError;

/// Rank used to order tokens; parentheses sort before every real operator.
pub(crate) fn token_rank(token_type: &TokenType) -> i8 {
    match token_type {
        TokenType::LeftParen | TokenType::RightParen => -1,
        TokenType::Number(_) | TokenType::Identifier(_) => precedence::LEAF as i8,
        TokenType::Negate => precedence::NEGATE as i8,
        TokenType::Multiply | TokenType::Divide => precedence::MULTIPLICATIVE as i8,
        TokenType::Add | TokenType::Subtract => precedence::ADDITIVE as i8,
    }
}

pub(crate) fn binary_operator(token_type: &TokenType) -> Option<BinaryOperator> {
    match token_type {
        TokenType::Add => Some(BinaryOperator::Add),
        TokenType::Subtract => Some(BinaryOperator::Sub),
        TokenType::Multiply => Some(BinaryOperator::Mul),
        TokenType::Divide => Some(BinaryOperator::Div),
        _ => None,
    }
}

/// Construction-time bookkeeping for one token.
#[derive(Debug, Default)]
struct Slot {
    /// Set once the token has been visited by some pass
    resolved: bool,
    /// The subtree this token stands for, while it is a root
    node: Option<ExpressionNode>,
    /// Token that absorbed this one into a larger subtree
    merge_target: Option<usize>,
}

pub struct TreeBuilder<'t> {
    tokens: &'t [Token],
    slots: Vec<Slot>,
}

impl<'t> TreeBuilder<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            slots: tokens.iter().map(|_| Slot::default()).collect(),
        }
    }

    /// Build the tree for the whole token sequence.
    pub fn build(mut self) -> Result<ExpressionNode, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::EmptyExpression);
        }
        let end = self.tokens.len();
        self.build_range(0, end)
    }

    /// Indices of `start..end` sorted by rank, ties by position.
    ///
    /// Negations at the same rank go right to left so `--x` wraps the inner
    /// one first.
    fn resolution_order(&self, start: usize, end: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (start..end).collect();
        order.sort_by_key(|&index| {
            let token_type = &self.tokens[index].token_type;
            let position = index as isize;
            let tie = if *token_type == TokenType::Negate {
                -position
            } else {
                position
            };
            (token_rank(token_type), tie)
        });
        order
    }

    fn build_range(&mut self, start: usize, end: usize) -> Result<ExpressionNode, ParseError> {
        let tokens = self.tokens;
        log::trace!("building tokens {start}..{end}");

        for index in self.resolution_order(start, end) {
            if self.slots[index].resolved {
                continue;
            }
            let token = &tokens[index];

            let node = match &token.token_type {
                TokenType::LeftParen => self.resolve_group(index, end)?,
                // Every matched ')' was claimed by its '(' already
                TokenType::RightParen => {
                    return Err(ParseError::UnmatchedCloseParen(token.location));
                }
                TokenType::Number(value) => ExpressionNode::Constant(*value),
                TokenType::Identifier(name) => ExpressionNode::Variable(name.clone()),
                TokenType::Negate => {
                    let operand = self.absorb(index, index + 1, start, end)?;
                    ExpressionNode::negate(operand)
                }
                other => {
                    let operator = binary_operator(other)
                        .ok_or_else(|| ParseError::missing_operand(token))?;
                    let left = match index.checked_sub(1) {
                        Some(left) => self.absorb(index, left, start, end)?,
                        None => return Err(ParseError::missing_operand(token)),
                    };
                    let right = self.absorb(index, index + 1, start, end)?;
                    ExpressionNode::binary(operator, left, right)
                }
            };

            log::trace!("resolved '{}' at {}", token.lexeme, token.location);
            let slot = &mut self.slots[index];
            slot.resolved = true;
            slot.node = Some(node);
        }

        let root = self.root(start);
        for index in start..end {
            if self.root(index) != root {
                return Err(ParseError::missing_operator(&tokens[index]));
            }
        }
        self.slots[root]
            .node
            .take()
            .ok_or(ParseError::EmptyExpression)
    }

    /// Build the parenthesized group opened at `open` and claim its `)`.
    fn resolve_group(&mut self, open: usize, end: usize) -> Result<ExpressionNode, ParseError> {
        let tokens = self.tokens;
        let close = matching_close(tokens, open, end)?;
        if close == open + 1 {
            return Err(ParseError::EmptyParentheses(tokens[open].location));
        }

        let inner = self.build_range(open + 1, close)?;
        let interior = self.root(open + 1);
        self.slots[interior].merge_target = Some(open);

        let closing = &mut self.slots[close];
        closing.resolved = true;
        closing.merge_target = Some(open);
        Ok(inner)
    }

    /// Take the subtree currently representing `neighbor` and merge it into
    /// the operator at `operator`.
    fn absorb(
        &mut self,
        operator: usize,
        neighbor: usize,
        start: usize,
        end: usize,
    ) -> Result<ExpressionNode, ParseError> {
        let tokens = self.tokens;
        let missing = || ParseError::missing_operand(&tokens[operator]);
        if neighbor < start || neighbor >= end {
            return Err(missing());
        }
        // An unresolved neighbour is another operator, not an operand
        let root = self.root(neighbor);
        let Some(node) = self.slots[root].node.take() else {
            return Err(missing());
        };
        self.slots[root].merge_target = Some(operator);
        Ok(node)
    }

    /// Follow merge targets to the token representing `index`, compressing
    /// the path on the way.
    fn root(&mut self, index: usize) -> usize {
        let mut root = index;
        while let Some(next) = self.slots[root].merge_target {
            root = next;
        }
        let mut cursor = index;
        while let Some(next) = self.slots[cursor].merge_target {
            self.slots[cursor].merge_target = Some(root);
            cursor = next;
        }
        root
    }
}

/// Index of the `)` closing the `(` at `open`, searching before `end`.
fn matching_close(tokens: &[Token], open: usize, end: usize) -> Result<usize, ParseError> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().take(end).skip(open + 1) {
        match token.token_type {
            TokenType::LeftParen => depth += 1,
            TokenType::RightParen if depth == 0 => return Ok(index),
            TokenType::RightParen => depth -= 1,
            _ => {}
        }
    }
    Err(ParseError::UnmatchedOpenParen(tokens[open].location))
}

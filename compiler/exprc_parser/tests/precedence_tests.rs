use exprc_ast::ast::{BinaryOperator, ExpressionNode};
use exprc_parser::parser::test_utils::tokenize;
use exprc_parser::parser::tree_builder::TreeBuilder;
use exprc_parser::{parse_line, parse_tokens, ParseError, ParseStrategy, ParserConfig};
use pretty_assertions::assert_eq;

fn canonical(source: &str) -> String {
    parse_tokens(&tokenize(source)).unwrap().to_string()
}

#[test]
fn test_operator_precedence() {
    // Multiplication binds tighter than addition
    let tree = parse_tokens(&tokenize("2 + 3 * 4")).unwrap();
    match &tree {
        ExpressionNode::Binary(bin) => {
            assert_eq!(bin.operator, BinaryOperator::Add);
            assert_eq!(bin.left, ExpressionNode::Constant(2.0));
            match &bin.right {
                ExpressionNode::Binary(mul) => {
                    assert_eq!(mul.operator, BinaryOperator::Mul);
                    assert_eq!(mul.left, ExpressionNode::Constant(3.0));
                    assert_eq!(mul.right, ExpressionNode::Constant(4.0));
                }
                other => panic!("Expected multiplication on the right, got {other:?}"),
            }
        }
        other => panic!("Expected a binary expression, got {other:?}"),
    }
}

#[test]
fn test_left_associativity() {
    assert_eq!(canonical("1 - 2 + 3"), "((1 - 2) + 3)");
    assert_eq!(canonical("8 / 4 / 2"), "((8 / 4) / 2)");
    assert_eq!(canonical("a * b / c * d"), "(((a * b) / c) * d)");
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(canonical("(2 + 3) * 4"), "((2 + 3) * 4)");
    assert_eq!(canonical("2 * (3 + 4) * 5"), "((2 * (3 + 4)) * 5)");
    assert_eq!(canonical("((((x))))"), "x");
}

#[test]
fn test_negation() {
    assert_eq!(canonical("-x * y"), "((-x) * y)");
    assert_eq!(canonical("-(x * y)"), "(-(x * y))");
    assert_eq!(canonical("--x"), "(-(-x))");
    assert_eq!(canonical("a - -b"), "(a - (-b))");
    assert_eq!(canonical("(a) - b"), "(a - b)");
}

#[test]
fn test_assignment_marker_is_ignored() {
    assert_eq!(canonical("= 1 + 2"), "(1 + 2)");
    assert_eq!(canonical("1 + 2 ="), "(1 + 2)");
}

#[test]
fn test_builder_is_reusable_per_line() {
    for source in ["1", "x", "1 + 2", "-(a / b)"] {
        let tokens = tokenize(source);
        let first = TreeBuilder::new(&tokens).build().unwrap();
        let second = TreeBuilder::new(&tokens).build().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_malformed_lines_are_rejected() {
    let cases: &[(&str, fn(&ParseError) -> bool)] = &[
        ("(", |e| matches!(e, ParseError::UnmatchedOpenParen(_))),
        (")", |e| matches!(e, ParseError::UnmatchedCloseParen(_))),
        ("( )", |e| matches!(e, ParseError::EmptyParentheses(_))),
        ("1 +", |e| matches!(e, ParseError::MissingOperand { .. })),
        ("-", |e| matches!(e, ParseError::MissingOperand { .. })),
        ("x y", |e| matches!(e, ParseError::MissingOperator { .. })),
        ("2 (3)", |e| matches!(e, ParseError::MissingOperator { .. })),
        ("4 # 4", |e| matches!(e, ParseError::Lex(_))),
    ];
    for strategy in [ParseStrategy::SortedPass, ParseStrategy::PrecedenceClimbing] {
        let config = ParserConfig::with_strategy(strategy);
        for (source, check) in cases {
            let err = parse_line(source, config).unwrap_err();
            assert!(check(&err), "{strategy}: {source:?} gave {err:?}");
        }
    }
}

// End-to-end behaviour of parse / render / evaluate through the public API
use exprc::{Error, EvalError, ExpressionNode, LexError, ParseError};
use exprc_ast::ast::BinaryOperator::{Add, Mul, Sub};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tests::{canonical, env, eval_str, minimal, parse_one};

fn num(value: f64) -> ExpressionNode {
    ExpressionNode::Constant(value)
}

#[test]
fn precedence() {
    assert_eq!(eval_str("1 + 2 * 3", &env(&[])), Ok(7.0));
    assert_eq!(eval_str("(1 + 2) * 3", &env(&[])), Ok(9.0));
    assert_eq!(eval_str("2 * 3 + 4 * 5", &env(&[])), Ok(26.0));
    assert_eq!(eval_str("24 / 4 / 2", &env(&[])), Ok(3.0));
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(eval_str("10 - 2 - 3", &env(&[])), Ok(5.0));

    let left = ExpressionNode::binary(
        Sub,
        ExpressionNode::binary(Sub, num(10.0), num(2.0)),
        num(3.0),
    );
    let right = ExpressionNode::binary(
        Sub,
        num(10.0),
        ExpressionNode::binary(Sub, num(2.0), num(3.0)),
    );
    assert_eq!(exprc::render_minimal(&left), "10 - 2 - 3");
    assert_eq!(exprc::render_minimal(&right), "10 - (2 - 3)");
}

#[test]
fn canonical_render_is_fully_parenthesized() {
    let expr = ExpressionNode::binary(
        Add,
        num(1.0),
        ExpressionNode::binary(Mul, num(2.0), num(3.0)),
    );
    assert_eq!(exprc::render_canonical(&expr), "(1 + (2 * 3))");
    assert_eq!(canonical("-x + 3"), "((-x) + 3)");
    assert_eq!(canonical("((a))"), "a");
}

#[test]
fn unary_minus_depends_on_context() {
    let vars = env(&[("x", 5.0)]);
    assert_eq!(eval_str("-x + 3", &vars), Ok(-2.0));
    assert_eq!(eval_str("3 - x", &vars), Ok(-2.0));
    assert_eq!(eval_str("3 * -x", &vars), Ok(-15.0));
    assert_eq!(eval_str("(-x)", &vars), Ok(-5.0));
    assert_eq!(eval_str("(x) - 1", &vars), Ok(4.0));
    assert_eq!(eval_str("--x", &vars), Ok(5.0));
}

#[test]
fn minimal_render_drops_only_redundant_parentheses() {
    assert_eq!(minimal("(a + b) + c"), "a + b + c");
    assert_eq!(minimal("a + (b + c)"), "a + b + c");
    assert_eq!(minimal("a - (b + c)"), "a - (b + c)");
    assert_eq!(minimal("(a * b) / (c * d)"), "a * b / (c * d)");
    assert_eq!(minimal("-(a)"), "-a");
    assert_eq!(minimal("-(a * b)"), "-(a * b)");
    assert_eq!(minimal("(-a) * b"), "-a * b");
}

#[test]
fn variables_and_undefined_names() {
    assert_eq!(eval_str("x", &env(&[("x", 2.5)])), Ok(2.5));
    assert_eq!(
        eval_str("x", &env(&[])),
        Err(Error::Eval(EvalError::UndefinedVariable("x".into())))
    );
    assert_eq!(
        eval_str("y * 0 + x", &env(&[("x", 1.0)])),
        Err(Error::Eval(EvalError::UndefinedVariable("y".into())))
    );
}

#[test]
fn division_by_zero_follows_ieee() {
    assert_eq!(eval_str("1 / 0", &env(&[])), Ok(f64::INFINITY));
    assert_eq!(eval_str("-1 / 0", &env(&[])), Ok(f64::NEG_INFINITY));
    assert!(eval_str("0 / 0", &env(&[])).unwrap().is_nan());
}

#[test]
fn no_expression_is_not_an_error() {
    assert_eq!(exprc::parse(""), Ok(None));
    assert_eq!(exprc::parse(" \t "), Ok(None));
}

#[test]
fn malformed_input_is_a_defined_error() {
    for line in ["(", ")", "()", "1 +", "* 1", "1 2", "a (b)"] {
        let err = exprc::parse(line).unwrap_err();
        assert!(
            matches!(err, Error::Parse(_)),
            "{line:?} should fail to parse, got {err:?}"
        );
    }
    assert!(matches!(
        exprc::parse("()"),
        Err(Error::Parse(ParseError::EmptyParentheses(_)))
    ));
    for line in ["1 & 2", "x_y"] {
        let err = exprc::parse(line).unwrap_err();
        assert!(matches!(err, Error::Lex(_)), "{line:?} gave {err:?}");
    }
}

#[test]
fn overflowing_literal_is_rejected() {
    for line in ["1e999", "2 * 1e400", "-(1e309)"] {
        match exprc::parse(line) {
            Err(Error::Lex(LexError::MalformedInput { location, .. })) => {
                assert_eq!(&line[location.offset..location.offset + 1], "1", "{line:?}");
            }
            other => panic!("{line:?} should be rejected, got {other:?}"),
        }
    }

    // The largest finite literals still render to text that parses back
    let vars = env(&[]);
    for line in ["1e308", "1.7976931348623157e308 * 2", "-1e308 - 1e308"] {
        let expr = parse_one(line);
        let value = exprc::evaluate(&expr, &vars);
        let canonical = parse_one(&exprc::render_canonical(&expr));
        assert_eq!(exprc::evaluate(&canonical, &vars), value, "{line:?}");
        let minimal = parse_one(&exprc::render_minimal(&expr));
        assert_eq!(exprc::evaluate(&minimal, &vars), value, "{line:?}");
    }
}

#[test]
fn only_first_expression_of_a_line_is_read() {
    assert_eq!(canonical("1 + 2; 3 * 4"), "(1 + 2)");
}

proptest! {
    #[test]
    fn literal_evaluates_to_itself(v in 0.0f64..1.0e12) {
        let text = v.to_string();
        prop_assert_eq!(eval_str(&text, &env(&[])), Ok(v));
    }

    #[test]
    fn variable_evaluates_to_binding(n in proptest::num::f64::NORMAL, name in "[a-zA-Z][a-zA-Z0-9]{0,6}") {
        let vars = env(&[(name.as_str(), n)]);
        prop_assert_eq!(eval_str(&name, &vars), Ok(n));
    }

    #[test]
    fn canonical_round_trip_preserves_value(a in -50i32..50, b in 1i32..50, c in -50i32..50) {
        let vars = env(&[("a", a as f64), ("b", b as f64), ("c", c as f64)]);
        for source in ["a - b * c", "(a - b) * c", "-a / b + c", "a - (b - c) / -b"] {
            let expr = parse_one(source);
            let again = parse_one(&exprc::render_canonical(&expr));
            prop_assert_eq!(exprc::evaluate(&again, &vars), exprc::evaluate(&expr, &vars));
            let again = parse_one(&exprc::render_minimal(&expr));
            prop_assert_eq!(exprc::evaluate(&again, &vars), exprc::evaluate(&expr, &vars));
        }
    }
}

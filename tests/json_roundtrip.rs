// The expression tree survives a trip through JSON
use exprc_ast::{from_json, to_json, ExpressionNode};
use pretty_assertions::assert_eq;
use tests::parse_one;

#[test]
fn parsed_tree_round_trips_through_json() {
    for source in ["1", "x", "-(a + 2.5) * b", "a - (b - c) / d"] {
        let expr = parse_one(source);
        let json = to_json(&expr).unwrap();
        let back: ExpressionNode = from_json(&json).unwrap();
        assert_eq!(back, expr, "json was {json}");
    }
}

#[test]
fn json_names_node_kinds() {
    let json = to_json(&parse_one("-x")).unwrap();
    assert!(json.contains(r#""type": "Negate""#), "{json}");
}

// tests/builder_tests.rs

use querykit::ast::{BinaryOperatorKind, QueryNode};
use querykit::operations::{and, field, not_query, table, val};
use querykit::{QueryError, QueryValue, merge};

// ============================================================================
// Fragment construction
// ============================================================================

#[test]
fn test_field_fragment() {
    let q = field("Year").unwrap();

    assert_eq!(q.root(), Some(&QueryNode::Field("Year".to_string())));
}

#[test]
fn test_field_name_cannot_be_blank() {
    assert!(matches!(field(""), Err(QueryError::InvalidArgument(_))));
    assert!(matches!(field("   "), Err(QueryError::InvalidArgument(_))));
}

#[test]
fn test_table_name_cannot_be_blank() {
    assert!(matches!(table(""), Err(QueryError::InvalidArgument(_))));
    assert!(matches!(table(" \t "), Err(QueryError::InvalidArgument(_))));
}

#[test]
fn test_val_fragment() {
    let q = val(1989);

    assert_eq!(
        q.root(),
        Some(&QueryNode::Constant(QueryValue::Integer(1989)))
    );
}

#[test]
fn test_zero_argument_operator_has_both_slots_empty() {
    let q = and();

    match q.root() {
        Some(QueryNode::BinaryOperator {
            kind: BinaryOperatorKind::And,
            left: None,
            right: None,
        }) => {}
        other => panic!("expected an empty and fragment, got {:?}", other),
    }
}

#[test]
fn test_not_query_groups_its_argument() {
    let q = not_query(field("BestPictureWinner").unwrap().eq(false).unwrap());

    match q.root() {
        Some(QueryNode::UnaryOperator {
            argument: Some(inner),
            ..
        }) => {
            assert!(matches!(**inner, QueryNode::UnaryOperator { .. }));
        }
        other => panic!("expected a not node with a grouped argument, got {:?}", other),
    }
}

#[test]
fn test_function_builder_drops_empty_argument() {
    // A query with no root contributes nothing to the argument list.
    let q = querykit::operations::concat(field("Title").unwrap(), querykit::Query::new());

    match q.root() {
        Some(QueryNode::FunctionCall { arguments, .. }) => assert_eq!(arguments.len(), 1),
        other => panic!("expected a function call, got {:?}", other),
    }
}

// ============================================================================
// Merge engine
// ============================================================================

#[test]
fn test_leaf_attaches_into_empty_left_slot() {
    let leaf = QueryNode::Field("Year".to_string());
    let op = QueryNode::BinaryOperator {
        kind: BinaryOperatorKind::Gt,
        left: None,
        right: Some(Box::new(QueryNode::Constant(QueryValue::Integer(1989)))),
    };

    let tree = merge(leaf, op).unwrap();

    match tree {
        QueryNode::BinaryOperator {
            kind: BinaryOperatorKind::Gt,
            left: Some(left),
            right: Some(_),
        } => assert_eq!(*left, QueryNode::Field("Year".to_string())),
        other => panic!("expected a filled gt node, got {:?}", other),
    }
}

#[test]
fn test_open_slot_is_filled_by_next_fragment() {
    // field("age").gt().val(3)
    let q = field("age")
        .unwrap()
        .op(BinaryOperatorKind::Gt)
        .unwrap()
        .val(3)
        .unwrap();

    assert!(q.root().unwrap().is_complete());
}

#[test]
fn test_leaf_cannot_attach_to_leaf() {
    let result = field("a").unwrap().val(1);

    assert!(matches!(result, Err(QueryError::InvalidSequence(_))));
}

#[test]
fn test_two_operators_in_a_row_is_an_invalid_sequence() {
    // field("a").eq().eq()
    let result = field("a")
        .unwrap()
        .op(BinaryOperatorKind::Eq)
        .unwrap()
        .op(BinaryOperatorKind::Eq);

    assert!(matches!(result, Err(QueryError::InvalidSequence(_))));
}

#[test]
fn test_operator_after_complete_comparison_starts_a_new_level() {
    // field("Year").gt(1989).and().field("Year").lt(2000) builds a
    // left-leaning tree rooted at the last operator.
    let q = field("Year")
        .unwrap()
        .gt(1989)
        .unwrap()
        .and()
        .unwrap()
        .field("Year")
        .unwrap()
        .lt(2000)
        .unwrap();

    match q.root() {
        Some(QueryNode::BinaryOperator {
            kind: BinaryOperatorKind::Lt,
            left: Some(left),
            ..
        }) => {
            assert!(matches!(
                **left,
                QueryNode::BinaryOperator {
                    kind: BinaryOperatorKind::And,
                    ..
                }
            ));
        }
        other => panic!("expected the last comparison at the root, got {:?}", other),
    }
}

#[test]
fn test_join_with_no_left_root_adopts_right_root() {
    let q = table("Movies").unwrap().field("Year").unwrap();

    assert_eq!(q.root(), Some(&QueryNode::Field("Year".to_string())));
}

#[test]
fn test_invalid_sequence_error_message() {
    let err = field("a")
        .unwrap()
        .op(BinaryOperatorKind::Eq)
        .unwrap()
        .op(BinaryOperatorKind::Eq)
        .unwrap_err();

    assert!(err.to_string().starts_with("Invalid query sequence"));
}

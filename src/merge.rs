//! The slot-filling merge engine.
//!
//! Every fluent call produces a standalone fragment; this module grafts each
//! new fragment onto the tree built so far. The left tree contributes at most
//! one open slot (the one that governs attachment), and the merge moves the
//! right fragment into it - or, when the left tree is complete, moves the
//! left tree into the right fragment's empty `left` slot, making the fragment
//! the new root.
//!
//! The result is deliberately left-leaning: after
//! `field("Year").gt(1989).and().field("Year").lt(2000)` the root is the
//! *last* binary operator, with the whole earlier chain hanging off its left
//! slot. Rendering flattens this back out, so the output reads in call order.

use crate::ast::QueryNode;
use crate::error::QueryError;

/// Merge a fragment into a tree, producing the new tree root.
///
/// Dispatches on the left tree's root:
///
/// - a unary operator with an empty slot absorbs the fragment as its argument;
/// - a binary operator with an open slot absorbs the fragment as an operand,
///   unless the fragment is itself a binary operator still waiting for its
///   left operand (two connectives in a row - an invalid sequence);
/// - a complete tree attaches onto a fragment whose `left` slot is empty,
///   which becomes the new root; any other fragment is an invalid sequence.
///
/// # Examples
///
/// ```
/// use querykit::ast::{BinaryOperatorKind, QueryNode};
/// use querykit::{QueryValue, merge};
///
/// let field = QueryNode::Field("Year".to_string());
/// let gt = QueryNode::BinaryOperator {
///     kind: BinaryOperatorKind::Gt,
///     left: None,
///     right: Some(Box::new(QueryNode::Constant(QueryValue::Integer(1989)))),
/// };
///
/// let tree = merge(field, gt).unwrap();
/// assert!(tree.is_complete());
/// ```
pub fn merge(left: QueryNode, right: QueryNode) -> Result<QueryNode, QueryError> {
    match left {
        QueryNode::UnaryOperator {
            kind,
            argument: None,
        } => Ok(QueryNode::UnaryOperator {
            kind,
            argument: Some(Box::new(right)),
        }),
        QueryNode::BinaryOperator {
            kind,
            left: None,
            right: filled,
        } => {
            reject_dangling_operator(&right)?;
            Ok(QueryNode::BinaryOperator {
                kind,
                left: Some(Box::new(right)),
                right: filled,
            })
        }
        QueryNode::BinaryOperator {
            kind,
            left: filled @ Some(_),
            right: None,
        } => {
            reject_dangling_operator(&right)?;
            Ok(QueryNode::BinaryOperator {
                kind,
                left: filled,
                right: Some(Box::new(right)),
            })
        }
        complete => attach(complete, right),
    }
}

/// A complete left tree becomes the left operand of the incoming fragment.
fn attach(left: QueryNode, right: QueryNode) -> Result<QueryNode, QueryError> {
    match right {
        QueryNode::BinaryOperator {
            kind,
            left: None,
            right: filled,
        } => Ok(QueryNode::BinaryOperator {
            kind,
            left: Some(Box::new(left)),
            right: filled,
        }),
        _ => Err(QueryError::InvalidSequence(
            "a complete expression can only be followed by a binary operator".to_string(),
        )),
    }
}

/// An operand slot cannot be filled by an operator that is itself still
/// waiting for its left operand.
fn reject_dangling_operator(right: &QueryNode) -> Result<(), QueryError> {
    if let QueryNode::BinaryOperator { left: None, .. } = right {
        return Err(QueryError::InvalidSequence(
            "two operators in a row with no operand between them".to_string(),
        ));
    }
    Ok(())
}

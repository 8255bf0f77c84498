use crate::ast::{BinaryOperatorKind, FunctionCallKind, UnaryOperatorKind};
use crate::value::QueryValue;

/// A node in a query filter expression tree.
///
/// The tree is the internal representation of a filter after the fluent
/// builder calls have been merged. It is owned and acyclic; empty child
/// slots are `None` until the merge engine fills them.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// A literal constant
    ///
    /// # Example
    /// ```text
    /// val(1989)
    /// ```
    Constant(QueryValue),

    /// A reference to a table field by name
    ///
    /// # Example
    /// ```text
    /// field("Year")
    /// ```
    Field(String),

    /// Unary operator with a single argument slot
    ///
    /// `Group` renders as parentheses around its argument; `Not` negates it.
    UnaryOperator {
        kind: UnaryOperatorKind,
        argument: Option<Box<QueryNode>>,
    },

    /// Binary operator with left and right argument slots
    ///
    /// Covers the logical connectives, comparisons and arithmetic. A fresh
    /// fragment built by the fluent API always has an empty `left` slot.
    BinaryOperator {
        kind: BinaryOperatorKind,
        left: Option<Box<QueryNode>>,
        right: Option<Box<QueryNode>>,
    },

    /// Function call with an ordered argument list
    ///
    /// Arguments are filled eagerly when the fragment is built, so a
    /// function call never exposes an open slot to the merge engine.
    FunctionCall {
        kind: FunctionCallKind,
        arguments: Vec<QueryNode>,
    },
}

impl QueryNode {
    /// Whether every direct slot of this node is filled.
    ///
    /// The check is shallow: a filled slot may itself hold an incomplete
    /// subtree, which the merge engine treats as complete from here on.
    pub fn is_complete(&self) -> bool {
        match self {
            QueryNode::Constant(_) | QueryNode::Field(_) | QueryNode::FunctionCall { .. } => true,
            QueryNode::UnaryOperator { argument, .. } => argument.is_some(),
            QueryNode::BinaryOperator { left, right, .. } => left.is_some() && right.is_some(),
        }
    }

    /// Wrap a node in a `Group` so it renders parenthesized.
    pub fn grouped(node: QueryNode) -> QueryNode {
        QueryNode::UnaryOperator {
            kind: UnaryOperatorKind::Group,
            argument: Some(Box::new(node)),
        }
    }
}

//! Free-function fragment builders.
//!
//! Each builder returns a standalone [`Query`] fragment - usually a single
//! node with empty slots - ready to be chained onto another query with the
//! fluent methods, or passed as a sub-expression operand. Only [`table`] and
//! [`field`] can fail (blank names); everything else builds unconditionally.
//!
//! ```
//! use querykit::operations::{field, not_query};
//! use querykit::output::odata;
//!
//! let q = not_query(field("BestPictureWinner")?.eq(false)?);
//! assert_eq!(odata::row_filter(&q), "not (BestPictureWinner eq false)");
//! # Ok::<(), querykit::QueryError>(())
//! ```

use crate::ast::{BinaryOperatorKind, FunctionCallKind, QueryNode, UnaryOperatorKind};
use crate::error::QueryError;
use crate::query::Query;
use crate::value::QueryValue;

/// Creates an empty query against the named table.
///
/// This is the entry point of a fluent chain; the table name is the only
/// descriptor field set. A blank name is an invalid-argument error.
pub fn table(table_name: &str) -> Result<Query, QueryError> {
    if table_name.trim().is_empty() {
        return Err(QueryError::InvalidArgument(
            "table name cannot be empty".to_string(),
        ));
    }

    Ok(Query::default().with_table(table_name))
}

/// Creates a query fragment referencing a field by name.
///
/// A blank name is an invalid-argument error.
pub fn field(field_name: &str) -> Result<Query, QueryError> {
    if field_name.trim().is_empty() {
        return Err(QueryError::InvalidArgument(
            "field name cannot be empty".to_string(),
        ));
    }

    Ok(Query::fragment(QueryNode::Field(field_name.to_string())))
}

/// Creates a query fragment holding a constant value.
pub fn val(value: impl Into<QueryValue>) -> Query {
    Query::fragment(QueryNode::Constant(value.into()))
}

/// Groups a query as a single parenthesized argument.
pub fn group(other: Query) -> Query {
    unary_operator(Some(other), UnaryOperatorKind::Group)
}

/****** Logical Operators ******/

/// Conditional and, awaiting both operands.
pub fn and() -> Query {
    binary_operator(None, BinaryOperatorKind::And)
}

/// Conditional and with the right operand grouped from `other`.
pub fn and_query(other: Query) -> Query {
    binary_operator(Some(other), BinaryOperatorKind::And)
}

/// Conditional or, awaiting both operands.
pub fn or() -> Query {
    binary_operator(None, BinaryOperatorKind::Or)
}

/// Conditional or with the right operand grouped from `other`.
pub fn or_query(other: Query) -> Query {
    binary_operator(Some(other), BinaryOperatorKind::Or)
}

/// Logical not, awaiting its argument.
pub fn not() -> Query {
    unary_operator(None, UnaryOperatorKind::Not)
}

/// Logical not of a grouped sub-expression.
pub fn not_query(other: Query) -> Query {
    let grouped = match other.into_root() {
        Some(node) => Some(Query::fragment(QueryNode::grouped(node))),
        None => None,
    };

    unary_operator(grouped, UnaryOperatorKind::Not)
}

/// Logical not of a boolean constant.
pub fn not_val(value: bool) -> Query {
    not_query(val(value))
}

/****** Comparison and Arithmetic Operators ******/

/// Equality comparison, awaiting both operands.
pub fn eq() -> Query {
    binary_operator(None, BinaryOperatorKind::Eq)
}

/// Inequality comparison, awaiting both operands.
pub fn ne() -> Query {
    binary_operator(None, BinaryOperatorKind::Ne)
}

/// Greater-than comparison, awaiting both operands.
pub fn gt() -> Query {
    binary_operator(None, BinaryOperatorKind::Gt)
}

/// Greater-than-or-equal comparison, awaiting both operands.
pub fn ge() -> Query {
    binary_operator(None, BinaryOperatorKind::Ge)
}

/// Less-than comparison, awaiting both operands.
pub fn lt() -> Query {
    binary_operator(None, BinaryOperatorKind::Lt)
}

/// Less-than-or-equal comparison, awaiting both operands.
pub fn le() -> Query {
    binary_operator(None, BinaryOperatorKind::Le)
}

/// Addition, awaiting both operands.
pub fn add() -> Query {
    binary_operator(None, BinaryOperatorKind::Add)
}

/// Subtraction, awaiting both operands.
pub fn sub() -> Query {
    binary_operator(None, BinaryOperatorKind::Sub)
}

/// Multiplication, awaiting both operands.
pub fn mul() -> Query {
    binary_operator(None, BinaryOperatorKind::Mul)
}

/// Division, awaiting both operands.
pub fn div() -> Query {
    binary_operator(None, BinaryOperatorKind::Div)
}

/// Modulo, awaiting both operands.
pub fn modulo() -> Query {
    binary_operator(None, BinaryOperatorKind::Mod)
}

/****** Date Functions ******/

/// Year part of a date-time expression.
pub fn year(exp: Query) -> Query {
    function(FunctionCallKind::Year, vec![exp])
}

/// Month part of a date-time expression.
pub fn month(exp: Query) -> Query {
    function(FunctionCallKind::Month, vec![exp])
}

/// Day part of a date-time expression.
pub fn day(exp: Query) -> Query {
    function(FunctionCallKind::Day, vec![exp])
}

/// Hour part of a date-time expression.
pub fn hour(exp: Query) -> Query {
    function(FunctionCallKind::Hour, vec![exp])
}

/// Minute part of a date-time expression.
pub fn minute(exp: Query) -> Query {
    function(FunctionCallKind::Minute, vec![exp])
}

/// Second part of a date-time expression.
pub fn second(exp: Query) -> Query {
    function(FunctionCallKind::Second, vec![exp])
}

/****** Math Functions ******/

/// Largest integer value not greater than the expression.
pub fn floor(exp: Query) -> Query {
    function(FunctionCallKind::Floor, vec![exp])
}

/// Smallest integer value not less than the expression.
pub fn ceiling(exp: Query) -> Query {
    function(FunctionCallKind::Ceiling, vec![exp])
}

/// The expression rounded to the nearest integer.
pub fn round(exp: Query) -> Query {
    function(FunctionCallKind::Round, vec![exp])
}

/****** String Functions ******/

/// The string expression lower-cased.
pub fn to_lower(exp: Query) -> Query {
    function(FunctionCallKind::ToLower, vec![exp])
}

/// The string expression upper-cased.
pub fn to_upper(exp: Query) -> Query {
    function(FunctionCallKind::ToUpper, vec![exp])
}

/// The length of the string expression.
pub fn length(exp: Query) -> Query {
    function(FunctionCallKind::Length, vec![exp])
}

/// The string expression with surrounding whitespace removed.
pub fn trim(exp: Query) -> Query {
    function(FunctionCallKind::Trim, vec![exp])
}

/// Whether the first expression's value starts with the second's.
pub fn starts_with(exp: Query, start: Query) -> Query {
    function(FunctionCallKind::StartsWith, vec![exp, start])
}

/// Whether the first expression's value ends with the second's.
pub fn ends_with(exp: Query, end: Query) -> Query {
    function(FunctionCallKind::EndsWith, vec![exp, end])
}

/// Whether the first expression's value occurs within the second's.
///
/// Note the argument order: the needle comes first, the haystack second.
pub fn substring_of(needle: Query, haystack: Query) -> Query {
    function(FunctionCallKind::SubstringOf, vec![needle, haystack])
}

/// The two string expressions concatenated, first value first.
pub fn concat(first: Query, second: Query) -> Query {
    function(FunctionCallKind::Concat, vec![first, second])
}

/// 0-based index of the second expression's value in the first's, or -1
/// when it does not occur.
pub fn index_of(haystack: Query, needle: Query) -> Query {
    function(FunctionCallKind::IndexOf, vec![haystack, needle])
}

/// The string value starting at the 0-based position given by `pos`.
pub fn substring(exp: Query, pos: Query) -> Query {
    function(FunctionCallKind::Substring, vec![exp, pos])
}

/// The string value of length `len` starting at the 0-based position `pos`.
pub fn substring_with_len(exp: Query, pos: Query, len: Query) -> Query {
    function(FunctionCallKind::Substring, vec![exp, pos, len])
}

/// The first expression's value with occurrences of the second's replaced
/// by the third's.
pub fn replace(exp: Query, find: Query, replacement: Query) -> Query {
    function(FunctionCallKind::Replace, vec![exp, find, replacement])
}

/****** Fragment construction ******/

fn unary_operator(other: Option<Query>, kind: UnaryOperatorKind) -> Query {
    let argument = other.and_then(Query::into_root).map(Box::new);

    Query::fragment(QueryNode::UnaryOperator { kind, argument })
}

/// A binary fragment always leaves its `left` slot empty; a supplied
/// sub-expression is grouped into the `right` slot.
fn binary_operator(other: Option<Query>, kind: BinaryOperatorKind) -> Query {
    let right = other
        .and_then(Query::into_root)
        .map(|node| Box::new(QueryNode::grouped(node)));

    Query::fragment(QueryNode::BinaryOperator {
        kind,
        left: None,
        right,
    })
}

/// Arguments are filled eagerly; a fragment with no root contributes
/// nothing to the argument list.
fn function(kind: FunctionCallKind, parameters: Vec<Query>) -> Query {
    let arguments = parameters
        .into_iter()
        .filter_map(Query::into_root)
        .collect();

    Query::fragment(QueryNode::FunctionCall { kind, arguments })
}

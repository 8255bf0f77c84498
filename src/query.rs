//! The query descriptor and its fluent method surface.
//!
//! A [`Query`] is the mutable container a fluent chain threads through:
//! the filter tree root plus the row-set modifiers (table name, ordering,
//! projection, paging, custom parameters, inline-count flag). Tree-building
//! methods consume the query and return `Result`, so chains read:
//!
//! ```
//! use querykit::operations::table;
//! use querykit::output::odata;
//!
//! let q = table("Movies")?
//!     .field("Year")?.gt(1989)?
//!     .and()?
//!     .field("Year")?.lt(2000)?;
//!
//! assert_eq!(odata::row_filter(&q), "Year gt 1989 and Year lt 2000");
//! # Ok::<(), querykit::QueryError>(())
//! ```
//!
//! Row-set modifier methods never fail and chain without `?`.

use chrono::{DateTime, Utc};

use crate::ast::{BinaryOperatorKind, QueryNode};
use crate::error::QueryError;
use crate::merge;
use crate::operations;
use crate::value::QueryValue;

/// Sort direction for an `order_by` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOrder {
    Ascending,
    Descending,
}

/// A query against a named table: filter tree plus row-set modifiers.
///
/// Created empty by [`operations::table`], mutated in place by every fluent
/// call. A query used as a reusable template must be [`deep_clone`]d before
/// a derived copy is mutated; clones share no structure with the original.
///
/// [`deep_clone`]: Query::deep_clone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    root: Option<QueryNode>,
    table_name: String,
    has_inline_count: bool,
    order_by: Vec<(String, QueryOrder)>,
    projection: Option<Vec<String>>,
    user_parameters: Vec<(String, Option<String>)>,
    top: u32,
    skip: u32,
}

/// An operand for the comparison and arithmetic methods.
///
/// Plain values attach as bare constants; a [`Query`] operand is an explicit
/// sub-expression and attaches parenthesized, so its internal shape survives
/// rendering:
///
/// ```
/// use querykit::operations::{field, table};
/// use querykit::output::odata;
///
/// let bare = table("Movies")?.field("Year")?.gt(1989)?;
/// assert_eq!(odata::row_filter(&bare), "Year gt 1989");
///
/// let sub = table("Movies")?.field("Year")?.gt(field("ReleaseYear")?)?;
/// assert_eq!(odata::row_filter(&sub), "Year gt (ReleaseYear)");
/// # Ok::<(), querykit::QueryError>(())
/// ```
pub trait IntoOperand {
    fn into_operand(self) -> Option<QueryNode>;
}

impl IntoOperand for Query {
    fn into_operand(self) -> Option<QueryNode> {
        self.root.map(QueryNode::grouped)
    }
}

impl IntoOperand for QueryValue {
    fn into_operand(self) -> Option<QueryNode> {
        Some(QueryNode::Constant(self))
    }
}

macro_rules! value_operand {
    ($($t:ty),*) => {$(
        impl IntoOperand for $t {
            fn into_operand(self) -> Option<QueryNode> {
                Some(QueryNode::Constant(QueryValue::from(self)))
            }
        }
    )*};
}

value_operand!(bool, i32, i64, f64, &str, String, DateTime<Utc>);

impl Query {
    /// An empty query: no filter, no modifiers, blank table name.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fragment(node: QueryNode) -> Self {
        Query {
            root: Some(node),
            ..Query::default()
        }
    }

    pub(crate) fn with_table(mut self, table_name: &str) -> Self {
        self.table_name = table_name.to_string();
        self
    }

    pub(crate) fn into_root(self) -> Option<QueryNode> {
        self.root
    }

    /****** Accessors ******/

    /// The root of the filter tree, if any filter has been built.
    pub fn root(&self) -> Option<&QueryNode> {
        self.root.as_ref()
    }

    /// The table this query targets.
    pub fn table(&self) -> &str {
        &self.table_name
    }

    /// Whether a total row count is requested alongside the page.
    pub fn has_inline_count(&self) -> bool {
        self.has_inline_count
    }

    /// Ordering entries in insertion order; duplicates allowed.
    pub fn ordering(&self) -> &[(String, QueryOrder)] {
        &self.order_by
    }

    /// Requested projection; `None` means all fields, and an empty list is
    /// distinct from `None`.
    pub fn projection(&self) -> Option<&[String]> {
        self.projection.as_deref()
    }

    /// User-defined parameters in insertion order; duplicates allowed.
    pub fn parameters(&self) -> &[(String, Option<String>)] {
        &self.user_parameters
    }

    /// Maximum rows to return; 0 means unbounded.
    pub fn row_limit(&self) -> u32 {
        self.top
    }

    /// Rows to skip before the first returned row; 0 means none.
    pub fn row_offset(&self) -> u32 {
        self.skip
    }

    /// A full structural copy: the tree and every list are copied
    /// element-wise, so mutating the clone never affects this query.
    pub fn deep_clone(&self) -> Query {
        self.clone()
    }

    /****** Row-Set Modifiers ******/

    /// Sets the table name. A blank name is an invalid-argument error.
    pub fn table_name(mut self, table_name: &str) -> Result<Query, QueryError> {
        if table_name.trim().is_empty() {
            return Err(QueryError::InvalidArgument(
                "table name cannot be empty".to_string(),
            ));
        }

        self.table_name = table_name.to_string();
        Ok(self)
    }

    /// Appends a user-defined parameter. Keys are not deduplicated; a `None`
    /// value serializes as the literal string `null`.
    pub fn parameter(mut self, key: &str, value: Option<&str>) -> Query {
        self.user_parameters
            .push((key.to_string(), value.map(str::to_string)));
        self
    }

    /// Appends an ordering entry.
    pub fn order_by(mut self, field: &str, order: QueryOrder) -> Query {
        self.order_by.push((field.to_string(), order));
        self
    }

    /// Sets the maximum number of rows to return.
    ///
    /// A non-positive argument leaves the current value unchanged, so a
    /// caller cannot request a zero-row page through this method.
    pub fn top(mut self, top: i32) -> Query {
        if top > 0 {
            self.top = top as u32;
        }
        self
    }

    /// Sets the number of rows to skip. A non-positive argument leaves the
    /// current value unchanged.
    pub fn skip(mut self, skip: i32) -> Query {
        if skip > 0 {
            self.skip = skip as u32;
        }
        self
    }

    /// Requests the total row count alongside the page. Idempotent.
    pub fn include_inline_count(mut self) -> Query {
        self.has_inline_count = true;
        self
    }

    /// Drops the total-row-count request. Idempotent.
    pub fn remove_inline_count(mut self) -> Query {
        self.has_inline_count = false;
        self
    }

    /// Replaces the projection wholesale with the given field names.
    ///
    /// `select(&[])` requests an empty projection, which is distinct from
    /// never having called `select` at all.
    pub fn select(mut self, fields: &[&str]) -> Query {
        self.projection = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    /****** Filter Tree ******/

    fn join(mut self, other: Query) -> Result<Query, QueryError> {
        self.root = match (self.root.take(), other.root) {
            (None, right) => right,
            (left, None) => left,
            (Some(left), Some(right)) => Some(merge::merge(left, right)?),
        };
        Ok(self)
    }

    /// Merges a grouped sub-expression into the filter.
    ///
    /// With no filter yet this sets the root to `(other)`; chained after a
    /// connective it fills that connective's open slot.
    pub fn filter(self, other: Query) -> Result<Query, QueryError> {
        self.join(operations::group(other))
    }

    /// Appends a field reference to the chain.
    pub fn field(self, field_name: &str) -> Result<Query, QueryError> {
        self.join(operations::field(field_name)?)
    }

    /// Appends a constant value to the chain.
    pub fn val(self, value: impl Into<QueryValue>) -> Result<Query, QueryError> {
        self.join(operations::val(value))
    }

    /// Appends a bare binary operator, both slots empty.
    ///
    /// This is the operator-without-operand form: `field("a")?.op(Gt)?.val(3)?`
    /// renders as `a gt 3`.
    pub fn op(self, kind: BinaryOperatorKind) -> Result<Query, QueryError> {
        self.join(Query::fragment(QueryNode::BinaryOperator {
            kind,
            left: None,
            right: None,
        }))
    }

    /****** Logical Operators ******/

    /// Conditional and; the next chained call supplies the right operand.
    pub fn and(self) -> Result<Query, QueryError> {
        self.op(BinaryOperatorKind::And)
    }

    /// Conditional and with a grouped sub-expression as the right operand.
    pub fn and_query(self, other: Query) -> Result<Query, QueryError> {
        self.join(operations::and_query(other))
    }

    /// Conditional or; the next chained call supplies the right operand.
    pub fn or(self) -> Result<Query, QueryError> {
        self.op(BinaryOperatorKind::Or)
    }

    /// Conditional or with a grouped sub-expression as the right operand.
    pub fn or_query(self, other: Query) -> Result<Query, QueryError> {
        self.join(operations::or_query(other))
    }

    /// Logical not; the next chained call supplies the argument.
    pub fn not(self) -> Result<Query, QueryError> {
        self.join(operations::not())
    }

    /// Logical not of a grouped sub-expression.
    pub fn not_query(self, other: Query) -> Result<Query, QueryError> {
        self.join(operations::not_query(other))
    }

    /// Logical not of a boolean constant.
    pub fn not_val(self, value: bool) -> Result<Query, QueryError> {
        self.join(operations::not_val(value))
    }

    /****** Comparison Operators ******/

    /// Equality comparison against an operand.
    pub fn eq(self, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.binary(BinaryOperatorKind::Eq, operand)
    }

    /// Inequality comparison against an operand.
    pub fn ne(self, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.binary(BinaryOperatorKind::Ne, operand)
    }

    /// Greater-than comparison against an operand.
    pub fn gt(self, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.binary(BinaryOperatorKind::Gt, operand)
    }

    /// Greater-than-or-equal comparison against an operand.
    pub fn ge(self, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.binary(BinaryOperatorKind::Ge, operand)
    }

    /// Less-than comparison against an operand.
    pub fn lt(self, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.binary(BinaryOperatorKind::Lt, operand)
    }

    /// Less-than-or-equal comparison against an operand.
    pub fn le(self, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.binary(BinaryOperatorKind::Le, operand)
    }

    /****** Arithmetic Operators ******/

    /// Addition with an operand.
    pub fn add(self, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.binary(BinaryOperatorKind::Add, operand)
    }

    /// Subtraction with an operand.
    pub fn sub(self, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.binary(BinaryOperatorKind::Sub, operand)
    }

    /// Multiplication with an operand.
    pub fn mul(self, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.binary(BinaryOperatorKind::Mul, operand)
    }

    /// Division with an operand.
    pub fn div(self, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.binary(BinaryOperatorKind::Div, operand)
    }

    /// Modulo with an operand.
    pub fn modulo(self, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.binary(BinaryOperatorKind::Mod, operand)
    }

    fn binary(self, kind: BinaryOperatorKind, operand: impl IntoOperand) -> Result<Query, QueryError> {
        self.join(Query::fragment(QueryNode::BinaryOperator {
            kind,
            left: None,
            right: operand.into_operand().map(Box::new),
        }))
    }

    /****** Date Functions ******/

    /// Appends a year-part extraction of `exp`.
    pub fn year(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::year(exp))
    }

    /// Appends a month-part extraction of `exp`.
    pub fn month(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::month(exp))
    }

    /// Appends a day-part extraction of `exp`.
    pub fn day(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::day(exp))
    }

    /// Appends an hour-part extraction of `exp`.
    pub fn hour(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::hour(exp))
    }

    /// Appends a minute-part extraction of `exp`.
    pub fn minute(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::minute(exp))
    }

    /// Appends a second-part extraction of `exp`.
    pub fn second(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::second(exp))
    }

    /****** Math Functions ******/

    /// Appends a floor of `exp`.
    pub fn floor(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::floor(exp))
    }

    /// Appends a ceiling of `exp`.
    pub fn ceiling(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::ceiling(exp))
    }

    /// Appends a rounding of `exp`.
    pub fn round(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::round(exp))
    }

    /****** String Functions ******/

    /// Appends a lower-casing of `exp`.
    pub fn to_lower(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::to_lower(exp))
    }

    /// Appends an upper-casing of `exp`.
    pub fn to_upper(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::to_upper(exp))
    }

    /// Appends a length computation of `exp`.
    pub fn length(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::length(exp))
    }

    /// Appends a whitespace trim of `exp`.
    pub fn trim(self, exp: Query) -> Result<Query, QueryError> {
        self.join(operations::trim(exp))
    }

    /// Appends a starts-with test.
    pub fn starts_with(self, exp: Query, start: Query) -> Result<Query, QueryError> {
        self.join(operations::starts_with(exp, start))
    }

    /// Appends an ends-with test.
    pub fn ends_with(self, exp: Query, end: Query) -> Result<Query, QueryError> {
        self.join(operations::ends_with(exp, end))
    }

    /// Appends a containment test: whether `needle` occurs in `haystack`.
    pub fn substring_of(self, needle: Query, haystack: Query) -> Result<Query, QueryError> {
        self.join(operations::substring_of(needle, haystack))
    }

    /// Appends a concatenation.
    pub fn concat(self, first: Query, second: Query) -> Result<Query, QueryError> {
        self.join(operations::concat(first, second))
    }

    /// Appends a 0-based index-of computation.
    pub fn index_of(self, haystack: Query, needle: Query) -> Result<Query, QueryError> {
        self.join(operations::index_of(haystack, needle))
    }

    /// Appends a substring from a 0-based position.
    pub fn substring(self, exp: Query, pos: Query) -> Result<Query, QueryError> {
        self.join(operations::substring(exp, pos))
    }

    /// Appends a bounded substring from a 0-based position.
    pub fn substring_with_len(self, exp: Query, pos: Query, len: Query) -> Result<Query, QueryError> {
        self.join(operations::substring_with_len(exp, pos, len))
    }

    /// Appends a find-and-replace computation.
    pub fn replace(self, exp: Query, find: Query, replacement: Query) -> Result<Query, QueryError> {
        self.join(operations::replace(exp, find, replacement))
    }
}

//! SQL filter writer and clause helpers for the local store.
//!
//! Renders the same trees as [`crate::output::odata`] into the embedded
//! engine's dialect. The remote service's function semantics are preserved
//! on top of the engine's builtins, which takes some emulation:
//!
//! - the engine has no `floor`/`ceil`, so both are expressed with `CASE`
//!   around `round`;
//! - `instr` is 1-based and returns 0 when absent, while the remote
//!   `indexof` is 0-based and returns -1, so one subtraction converts both
//!   the hit and the miss;
//! - `substr` positions are 1-based, so the 0-based input position gains 1.
//!
//! Argument text may be repeated verbatim inside a template (`Floor` renders
//! its argument four times). That is safe because filter expressions are
//! pure, and the templates must be reproduced exactly for the store to
//! behave like the service.

use crate::ast::{BinaryOperatorKind, FunctionCallKind, QueryNode, UnaryOperatorKind};
use crate::dates;
use crate::output::odata;
use crate::query::{Query, QueryOrder};
use crate::value::QueryValue;

/// The paging window consumed by the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitClause {
    /// Rows to skip before the first returned row.
    pub offset: u32,
    /// Maximum rows to return; `None` means unbounded (offset-only window).
    pub limit: Option<u32>,
}

/// Renders a query's filter tree as a `WHERE` fragment, or the empty string
/// when it has none.
pub fn where_clause(query: &Query) -> String {
    query.root().map(write).unwrap_or_default()
}

/// Renders a single tree to SQL filter text.
pub fn write(node: &QueryNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// The projected column list, quoted and lower-cased, or `None` when the
/// query selects all columns. An empty projection yields an empty list.
pub fn select_columns(query: &Query) -> Option<Vec<String>> {
    query
        .projection()
        .map(|fields| fields.iter().map(|f| quote_identifier(f)).collect())
}

/// The `ORDER BY` clause body, or `None` when no ordering was requested.
pub fn order_by_clause(query: &Query) -> Option<String> {
    if query.ordering().is_empty() {
        return None;
    }

    let entries: Vec<String> = query
        .ordering()
        .iter()
        .map(|(field, order)| {
            let direction = match order {
                QueryOrder::Ascending => "ASC",
                QueryOrder::Descending => "DESC",
            };
            format!("{} {}", quote_identifier(field), direction)
        })
        .collect();

    Some(entries.join(", "))
}

/// The paging window, or `None` when neither `top` nor `skip` was set.
pub fn limit_clause(query: &Query) -> Option<LimitClause> {
    let (offset, top) = (query.row_offset(), query.row_limit());

    if offset == 0 && top == 0 {
        return None;
    }

    Some(LimitClause {
        offset,
        limit: (top > 0).then_some(top),
    })
}

/// Column identifiers are stored lower-cased; quoting keeps reserved words
/// usable as field names.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.to_lowercase())
}

fn write_node(node: &QueryNode, out: &mut String) {
    match node {
        QueryNode::Constant(value) => out.push_str(&literal(value)),
        QueryNode::Field(name) => out.push_str(name),
        QueryNode::UnaryOperator { kind, argument } => match kind {
            UnaryOperatorKind::Group => {
                out.push('(');
                if let Some(argument) = argument {
                    write_node(argument, out);
                }
                out.push(')');
            }
            UnaryOperatorKind::Not => {
                out.push_str("NOT");
                if let Some(argument) = argument {
                    out.push(' ');
                    write_node(argument, out);
                }
            }
        },
        QueryNode::BinaryOperator { kind, left, right } => {
            if let Some(left) = left {
                write_node(left, out);
                out.push(' ');
            }
            out.push_str(operator_symbol(*kind, right.as_deref()));
            if let Some(right) = right {
                out.push(' ');
                write_node(right, out);
            }
        }
        QueryNode::FunctionCall { kind, arguments } => {
            let rendered: Vec<String> = arguments.iter().map(write).collect();
            out.push_str(&function_template(*kind, &rendered));
        }
    }
}

fn literal(value: &QueryValue) -> String {
    match value {
        QueryValue::Null => "NULL".to_string(),
        QueryValue::Boolean(b) => (if *b { "1" } else { "0" }).to_string(),
        QueryValue::Integer(n) => n.to_string(),
        QueryValue::Float(n) => odata::number(*n),
        QueryValue::String(s) => odata::quote(s),
        QueryValue::DateTime(d) => odata::quote(&dates::serialize(d)),
    }
}

/// Equality against a literal null constant must use the null-aware
/// operators; `x = NULL` never matches in the embedded engine.
fn operator_symbol(kind: BinaryOperatorKind, right: Option<&QueryNode>) -> &'static str {
    let null_right = matches!(right, Some(QueryNode::Constant(QueryValue::Null)));

    match kind {
        BinaryOperatorKind::And => "AND",
        BinaryOperatorKind::Or => "OR",
        BinaryOperatorKind::Eq => {
            if null_right {
                "IS"
            } else {
                "="
            }
        }
        BinaryOperatorKind::Ne => {
            if null_right {
                "IS NOT"
            } else {
                "<>"
            }
        }
        BinaryOperatorKind::Gt => ">",
        BinaryOperatorKind::Ge => ">=",
        BinaryOperatorKind::Lt => "<",
        BinaryOperatorKind::Le => "<=",
        BinaryOperatorKind::Add => "+",
        BinaryOperatorKind::Sub => "-",
        BinaryOperatorKind::Mul => "*",
        BinaryOperatorKind::Div => "/",
        BinaryOperatorKind::Mod => "%",
    }
}

/// Expands the per-function template over the rendered argument strings.
///
/// A missing argument renders as empty text, like any other absent slot.
fn function_template(kind: FunctionCallKind, args: &[String]) -> String {
    let arg = |index: usize| args.get(index).map(String::as_str).unwrap_or("");

    match kind {
        FunctionCallKind::Year => date_part("%Y", arg(0)),
        FunctionCallKind::Month => date_part("%m", arg(0)),
        FunctionCallKind::Day => date_part("%d", arg(0)),
        FunctionCallKind::Hour => date_part("%H", arg(0)),
        FunctionCallKind::Minute => date_part("%M", arg(0)),
        FunctionCallKind::Second => date_part("%S", arg(0)),
        FunctionCallKind::Round => format!("round({})", arg(0)),
        FunctionCallKind::Floor => {
            let x = arg(0);
            format!("CASE WHEN round({x}) > {x} THEN round({x}) - 1 ELSE round({x}) END")
        }
        FunctionCallKind::Ceiling => {
            let x = arg(0);
            format!("CASE WHEN round({x}) < {x} THEN round({x}) + 1 ELSE round({x}) END")
        }
        FunctionCallKind::ToLower => format!("lower({})", arg(0)),
        FunctionCallKind::ToUpper => format!("upper({})", arg(0)),
        FunctionCallKind::Length => format!("length({})", arg(0)),
        FunctionCallKind::Trim => format!("trim({})", arg(0)),
        FunctionCallKind::StartsWith => format!("({} LIKE ({} || '%'))", arg(0), arg(1)),
        FunctionCallKind::EndsWith => format!("({} LIKE ('%' || {}))", arg(0), arg(1)),
        // Arguments arrive needle-first; the haystack fills the leading slot.
        FunctionCallKind::SubstringOf => {
            format!("({} LIKE ('%' || {} || '%'))", arg(1), arg(0))
        }
        FunctionCallKind::Concat => format!("({} || {})", arg(0), arg(1)),
        FunctionCallKind::IndexOf => format!("(instr({},{}) - 1)", arg(0), arg(1)),
        FunctionCallKind::Substring => {
            if args.len() >= 3 {
                format!("(substr({},({} + 1),{}))", arg(0), arg(1), arg(2))
            } else {
                format!("(substr({},({} + 1)))", arg(0), arg(1))
            }
        }
        FunctionCallKind::Replace => {
            format!("replace({},{},{})", arg(0), arg(1), arg(2))
        }
    }
}

fn date_part(fmt: &str, arg: &str) -> String {
    format!("CAST(strftime('{fmt}', {arg}) AS INTEGER)")
}

//! Textual (OData-style) filter writer for the remote backend.
//!
//! Renders a filter tree to the `$filter` surface syntax: lower-cased
//! operator and function names, space-separated binary operators, single
//! quotes around strings and dates with embedded quotes doubled.
//!
//! ```
//! use querykit::operations::table;
//! use querykit::output::odata;
//!
//! let q = table("Movies")?.field("Year")?.gt(1989)?;
//! assert_eq!(odata::row_filter(&q), "Year gt 1989");
//! # Ok::<(), querykit::QueryError>(())
//! ```

use crate::ast::{BinaryOperatorKind, FunctionCallKind, QueryNode, UnaryOperatorKind};
use crate::dates;
use crate::query::Query;
use crate::value::QueryValue;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Renders a query's filter tree, or the empty string when it has none.
pub fn row_filter(query: &Query) -> String {
    query.root().map(write).unwrap_or_default()
}

/// Renders a single tree to filter text.
pub fn write(node: &QueryNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
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
                out.push_str("not");
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
            out.push_str(operator_name(*kind));
            if let Some(right) = right {
                out.push(' ');
                write_node(right, out);
            }
        }
        QueryNode::FunctionCall { kind, arguments } => {
            out.push_str(function_name(*kind));
            out.push('(');
            for (index, argument) in arguments.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_node(argument, out);
            }
            out.push(')');
        }
    }
}

fn literal(value: &QueryValue) -> String {
    match value {
        QueryValue::Null => "null".to_string(),
        QueryValue::Boolean(b) => b.to_string(),
        QueryValue::Integer(n) => n.to_string(),
        QueryValue::Float(n) => number(*n),
        QueryValue::String(s) => quote(s),
        QueryValue::DateTime(d) => quote(&dates::serialize(d)),
    }
}

/// Floats go through `Decimal` so the rendered literal reads as written
/// (`7.5`, never `7.5000000000000002`). NaN and infinities have no decimal
/// form and fall back to the float's own display.
pub(crate) fn number(n: f64) -> String {
    Decimal::from_f64(n)
        .map(|d| d.normalize().to_string())
        .unwrap_or_else(|| n.to_string())
}

/// Single-quoted, with embedded single quotes doubled.
pub(crate) fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn operator_name(kind: BinaryOperatorKind) -> &'static str {
    match kind {
        BinaryOperatorKind::And => "and",
        BinaryOperatorKind::Or => "or",
        BinaryOperatorKind::Eq => "eq",
        BinaryOperatorKind::Ne => "ne",
        BinaryOperatorKind::Gt => "gt",
        BinaryOperatorKind::Ge => "ge",
        BinaryOperatorKind::Lt => "lt",
        BinaryOperatorKind::Le => "le",
        BinaryOperatorKind::Add => "add",
        BinaryOperatorKind::Sub => "sub",
        BinaryOperatorKind::Mul => "mul",
        BinaryOperatorKind::Div => "div",
        BinaryOperatorKind::Mod => "mod",
    }
}

fn function_name(kind: FunctionCallKind) -> &'static str {
    match kind {
        FunctionCallKind::Year => "year",
        FunctionCallKind::Month => "month",
        FunctionCallKind::Day => "day",
        FunctionCallKind::Hour => "hour",
        FunctionCallKind::Minute => "minute",
        FunctionCallKind::Second => "second",
        FunctionCallKind::Round => "round",
        FunctionCallKind::Floor => "floor",
        FunctionCallKind::Ceiling => "ceiling",
        FunctionCallKind::ToLower => "tolower",
        FunctionCallKind::ToUpper => "toupper",
        FunctionCallKind::Length => "length",
        FunctionCallKind::Trim => "trim",
        FunctionCallKind::StartsWith => "startswith",
        FunctionCallKind::EndsWith => "endswith",
        FunctionCallKind::SubstringOf => "substringof",
        FunctionCallKind::Concat => "concat",
        FunctionCallKind::IndexOf => "indexof",
        FunctionCallKind::Substring => "substring",
        FunctionCallKind::Replace => "replace",
    }
}

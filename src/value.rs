use chrono::{DateTime, Utc};

use crate::dates;
use crate::error::QueryError;

/// A typed constant value carried by a filter expression.
///
/// Covers the scalar types the remote service understands, with a
/// distinction between integers and floats so that numeric literals render
/// exactly as written.
///
/// # Examples
///
/// ```
/// use querykit::QueryValue;
///
/// let null = QueryValue::Null;
/// let flag = QueryValue::Boolean(true);
/// let year = QueryValue::Integer(1989);
/// let rating = QueryValue::Float(7.5);
/// let title = QueryValue::String("The Shawshank Redemption".to_string());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Absent value; compares with the null-aware operators in SQL output
    Null,

    /// Boolean (renders as `true`/`false` remotely, `1`/`0` locally)
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Point in time; serialized as ISO-8601 with millisecond precision
    DateTime(DateTime<Utc>),
}

impl QueryValue {
    /// Whether this is the null constant.
    pub fn is_null(&self) -> bool {
        matches!(self, QueryValue::Null)
    }

    /// Convert a JSON scalar into a query value.
    ///
    /// This is the boundary with the entity-serialization layer: the typed
    /// field values it produces arrive here as `serde_json::Value`. Arrays
    /// and objects have no filter-literal form and are rejected.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, QueryError> {
        match value {
            serde_json::Value::Null => Ok(QueryValue::Null),
            serde_json::Value::Bool(b) => Ok(QueryValue::Boolean(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(QueryValue::Integer(i))
                } else {
                    // as_f64 is exhaustive for the remaining JSON numbers
                    Ok(QueryValue::Float(n.as_f64().unwrap_or_default()))
                }
            }
            serde_json::Value::String(s) => Ok(QueryValue::String(s.clone())),
            other => Err(QueryError::InvalidArgument(format!(
                "cannot use a JSON {} as a constant value",
                json_type_name(other)
            ))),
        }
    }

    /// Convert this value back into a JSON scalar.
    ///
    /// Dates become their ISO-8601 string form; a float that cannot be
    /// represented (NaN or infinity) becomes JSON null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            QueryValue::Null => serde_json::Value::Null,
            QueryValue::Boolean(b) => serde_json::Value::Bool(*b),
            QueryValue::Integer(i) => serde_json::Value::from(*i),
            QueryValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            QueryValue::String(s) => serde_json::Value::String(s.clone()),
            QueryValue::DateTime(d) => serde_json::Value::String(dates::serialize(d)),
        }
    }
}

/// Returns a human-readable type name for a JSON value
fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Boolean(b)
    }
}

impl From<i32> for QueryValue {
    fn from(n: i32) -> Self {
        QueryValue::Integer(i64::from(n))
    }
}

impl From<i64> for QueryValue {
    fn from(n: i64) -> Self {
        QueryValue::Integer(n)
    }
}

impl From<f64> for QueryValue {
    fn from(n: f64) -> Self {
        QueryValue::Float(n)
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::String(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::String(s)
    }
}

impl From<DateTime<Utc>> for QueryValue {
    fn from(d: DateTime<Utc>) -> Self {
        QueryValue::DateTime(d)
    }
}

//! Row-set modifier serialization for the remote backend.
//!
//! Turns a query's paging, ordering, projection and custom parameters into
//! the URL query-string fragment appended after the `$filter` expression.
//! Clauses appear in a fixed order regardless of the order the fluent calls
//! were made in: inline count, top, skip, ordering, user parameters,
//! projection.

use crate::query::{Query, QueryOrder};

/// Renders the row-set modifiers as a `&`-prefixed URL fragment.
///
/// ```
/// use querykit::QueryOrder;
/// use querykit::operations::table;
/// use querykit::output::rowset;
///
/// let q = table("People")?
///     .select(&["Id", "Name"])
///     .order_by("Name", QueryOrder::Ascending)
///     .skip(5)
///     .top(3);
///
/// assert_eq!(
///     rowset::row_set_modifiers(&q),
///     "&$top=3&$skip=5&$orderby=Name%20asc&$select=Id,Name"
/// );
/// # Ok::<(), querykit::QueryError>(())
/// ```
pub fn row_set_modifiers(query: &Query) -> String {
    let mut out = String::new();

    if query.has_inline_count() {
        out.push_str("&$inlinecount=allpages");
    }

    if query.row_limit() > 0 {
        out.push_str("&$top=");
        out.push_str(&query.row_limit().to_string());
    }

    if query.row_offset() > 0 {
        out.push_str("&$skip=");
        out.push_str(&query.row_offset().to_string());
    }

    if !query.ordering().is_empty() {
        out.push_str("&$orderby=");

        for (index, (field, order)) in query.ordering().iter().enumerate() {
            if index > 0 {
                out.push(',');
            }

            out.push_str(&percent_encode(field));
            out.push_str("%20");
            out.push_str(match order {
                QueryOrder::Ascending => "asc",
                QueryOrder::Descending => "desc",
            });
        }
    }

    for (key, value) in query.parameters() {
        out.push('&');
        out.push_str(&percent_encode(key));
        out.push('=');
        out.push_str(&percent_encode(value.as_deref().unwrap_or("null")));
    }

    if let Some(projection) = query.projection() {
        if !projection.is_empty() {
            out.push_str("&$select=");

            for (index, field) in projection.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&percent_encode(field));
            }
        }
    }

    out
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
pub fn percent_encode(s: &str) -> String {
    percent_encode_reserving(s, "")
}

/// Percent-encodes like [`percent_encode`], additionally letting the bytes
/// in `reserved` pass through unescaped.
pub fn percent_encode_reserving(s: &str, reserved: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for byte in s.bytes() {
        let c = byte as char;
        let unreserved =
            c.is_ascii_alphanumeric() || "-._~".contains(c) || reserved.contains(c);

        if unreserved {
            out.push(c);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }

    out
}

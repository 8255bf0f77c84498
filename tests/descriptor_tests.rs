// tests/descriptor_tests.rs

use querykit::operations::table;
use querykit::output::{odata, rowset};
use querykit::{QueryError, QueryOrder, QueryValue};

// ============================================================================
// Paging policy
// ============================================================================

#[test]
fn test_top_ignores_non_positive_values() {
    let q = table("Movies").unwrap().top(5).top(0).top(-1);

    assert_eq!(q.row_limit(), 5);
}

#[test]
fn test_skip_ignores_non_positive_values() {
    let q = table("Movies").unwrap().skip(0).skip(-3);

    assert_eq!(q.row_offset(), 0);
}

#[test]
fn test_unset_paging_is_unbounded() {
    let q = table("Movies").unwrap();

    assert_eq!(q.row_limit(), 0);
    assert_eq!(q.row_offset(), 0);
}

// ============================================================================
// Modifier state
// ============================================================================

#[test]
fn test_inline_count_toggle_is_idempotent() {
    let q = table("Movies")
        .unwrap()
        .include_inline_count()
        .include_inline_count();
    assert!(q.has_inline_count());

    let q = q.remove_inline_count().remove_inline_count();
    assert!(!q.has_inline_count());
}

#[test]
fn test_select_replaces_projection_wholesale() {
    let q = table("Movies")
        .unwrap()
        .select(&["Id", "Name", "Year"])
        .select(&["Id"]);

    assert_eq!(q.projection(), Some(&["Id".to_string()][..]));
}

#[test]
fn test_no_projection_is_distinct_from_empty_projection() {
    let all = table("Movies").unwrap();
    let none = table("Movies").unwrap().select(&[]);

    assert_eq!(all.projection(), None);
    assert_eq!(none.projection(), Some(&[][..]));
}

#[test]
fn test_table_name_setter_validates() {
    let q = table("Movies").unwrap();
    assert!(matches!(
        q.clone().table_name(""),
        Err(QueryError::InvalidArgument(_))
    ));

    let q = q.table_name("People").unwrap();
    assert_eq!(q.table(), "People");
}

#[test]
fn test_ordering_and_parameters_preserve_duplicates() {
    let q = table("Movies")
        .unwrap()
        .order_by("Year", QueryOrder::Ascending)
        .order_by("Year", QueryOrder::Ascending)
        .parameter("v", Some("1"))
        .parameter("v", Some("2"));

    assert_eq!(q.ordering().len(), 2);
    assert_eq!(q.parameters().len(), 2);
}

// ============================================================================
// Deep clone
// ============================================================================

#[test]
fn test_deep_clone_is_independent_of_the_original() {
    let original = table("Movies")
        .unwrap()
        .field("Year")
        .unwrap()
        .gt(1989)
        .unwrap()
        .order_by("Year", QueryOrder::Ascending)
        .parameter("v", Some("1"))
        .select(&["Id", "Year"])
        .top(10);

    let before_root = original.root().cloned();
    let before_modifiers = rowset::row_set_modifiers(&original);

    let derived = original
        .deep_clone()
        .and()
        .unwrap()
        .field("Title")
        .unwrap()
        .ne("Up")
        .unwrap()
        .order_by("Title", QueryOrder::Descending)
        .parameter("v", Some("2"))
        .select(&["Title"])
        .top(99);

    // The derived copy diverged ...
    assert_eq!(
        odata::row_filter(&derived),
        "Year gt 1989 and Title ne 'Up'"
    );
    assert_eq!(derived.ordering().len(), 2);
    assert_eq!(derived.row_limit(), 99);

    // ... and the original is untouched, structurally.
    assert_eq!(original.root().cloned(), before_root);
    assert_eq!(rowset::row_set_modifiers(&original), before_modifiers);
    assert_eq!(original.ordering().len(), 1);
    assert_eq!(original.parameters().len(), 1);
    assert_eq!(original.projection(), Some(&["Id".to_string(), "Year".to_string()][..]));
    assert_eq!(original.row_limit(), 10);
}

// ============================================================================
// Value interop
// ============================================================================

#[test]
fn test_from_json_scalars() {
    assert_eq!(
        QueryValue::from_json(&serde_json::json!(null)).unwrap(),
        QueryValue::Null
    );
    assert_eq!(
        QueryValue::from_json(&serde_json::json!(true)).unwrap(),
        QueryValue::Boolean(true)
    );
    assert_eq!(
        QueryValue::from_json(&serde_json::json!(1989)).unwrap(),
        QueryValue::Integer(1989)
    );
    assert_eq!(
        QueryValue::from_json(&serde_json::json!(7.5)).unwrap(),
        QueryValue::Float(7.5)
    );
    assert_eq!(
        QueryValue::from_json(&serde_json::json!("Up")).unwrap(),
        QueryValue::String("Up".to_string())
    );
}

#[test]
fn test_from_json_rejects_collections() {
    assert!(matches!(
        QueryValue::from_json(&serde_json::json!([1, 2])),
        Err(QueryError::InvalidArgument(_))
    ));
    assert!(matches!(
        QueryValue::from_json(&serde_json::json!({"a": 1})),
        Err(QueryError::InvalidArgument(_))
    ));
}

#[test]
fn test_to_json_round_trips_scalars() {
    let value = QueryValue::Integer(1989);
    assert_eq!(
        QueryValue::from_json(&value.to_json()).unwrap(),
        value
    );

    let date = querykit::dates::parse("2009-11-21T14:22:59.860Z").unwrap();
    assert_eq!(
        QueryValue::DateTime(date).to_json(),
        serde_json::json!("2009-11-21T14:22:59.860Z")
    );
}

// ============================================================================
// Dates
// ============================================================================

#[test]
fn test_date_serialization_has_millisecond_precision() {
    let date = querykit::dates::parse("2009-11-21T14:22:59Z").unwrap();

    assert_eq!(querykit::dates::serialize(&date), "2009-11-21T14:22:59.000Z");
}

#[test]
fn test_date_parse_normalizes_offsets_to_utc() {
    let date = querykit::dates::parse("2009-11-21T15:22:59.860+01:00").unwrap();

    assert_eq!(querykit::dates::serialize(&date), "2009-11-21T14:22:59.860Z");
}

#[test]
fn test_date_parse_rejects_garbage() {
    assert!(matches!(
        querykit::dates::parse("not a date"),
        Err(QueryError::InvalidArgument(_))
    ));
}

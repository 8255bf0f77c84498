//! Backend output generation.
//!
//! Two writers render a merged filter tree to a target surface syntax, and a
//! serializer turns the row-set modifiers into the form each backend consumes:
//!
//! - **[odata]** - the textual, OData-style filter sent to the remote service
//! - **[sql]** - the embedded-engine SQL dialect used by the local store,
//!   including the `SELECT`/`ORDER BY`/limit clause helpers
//! - **[rowset]** - the `&$top=…&$orderby=…` URL fragment for the remote
//!   backend
//!
//! Writers are stateless per invocation and never mutate the tree they visit.
//! They also never fail: an operator slot left legitimately absent renders as
//! empty text. Callers must not rely on such fragments being valid query
//! syntax - a tree is only fully renderable once every merge has completed.

pub mod odata;
pub mod rowset;
pub mod sql;

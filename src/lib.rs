pub mod ast;
pub mod dates;
pub mod error;
pub mod merge;
pub mod operations;
pub mod output;
pub mod query;
pub mod value;

pub use ast::{BinaryOperatorKind, FunctionCallKind, QueryNode, UnaryOperatorKind};
pub use error::QueryError;
pub use merge::merge;
pub use operations::{field, table, val};
pub use query::{IntoOperand, Query, QueryOrder};
pub use value::QueryValue;

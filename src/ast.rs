//! # Query Expression Tree
//!
//! This module defines the expression tree for table query filters: the
//! intermediate representation between the fluent builder API and the two
//! backend writers (OData-style text for the remote service, SQL for the
//! local store).
//!
//! ## Architecture Overview
//!
//! The module is organized into focused submodules:
//!
//! - **[nodes]** - The five node kinds forming the tree
//! - **[operators]** - Unary and binary operator kinds
//! - **[functions]** - The function-call kinds (date parts, math, string)
//!
//! ## Core Concepts
//!
//! ### Fragments and slots
//!
//! Fluent calls do not build a whole tree at once. Each call produces a
//! small *fragment* - usually a single node with one or two empty child
//! *slots* - and the merge engine grafts each new fragment onto the open
//! slot of the tree built so far:
//!
//! ```text
//! field("Year")          Field("Year")
//! .gt(1989)              BinaryOperator{Gt, left: <empty>, right: 1989}
//!                    =>  BinaryOperator{Gt, left: Field("Year"), right: 1989}
//! ```
//!
//! ### Completeness
//!
//! A node is *complete* when every slot it defines is filled. Leaves are
//! always complete, and function calls fill their arguments eagerly at
//! construction, so only operator nodes ever expose an open slot.
//!
//! ### Grouping
//!
//! Explicit sub-expressions passed as operands are wrapped in a
//! `UnaryOperatorKind::Group` node so that their internal shape survives
//! rendering regardless of surrounding precedence.
pub mod functions;
pub mod nodes;
pub mod operators;

pub use functions::FunctionCallKind;
pub use nodes::QueryNode;
pub use operators::{BinaryOperatorKind, UnaryOperatorKind};

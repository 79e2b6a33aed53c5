//! HIR layer tests
//!
//! Declaration indexing, signature resolution and candidate selection over
//! multi-file packages.

pub mod tests_index;
pub mod tests_resolve_select;

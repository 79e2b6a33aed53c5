//! Codegen layer tests
//!
//! Wrapper lowering and emitted Go text.

pub mod tests_emit;

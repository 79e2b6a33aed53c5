//! Parser layer tests
//!
//! Tokenization and CST construction of whole Go files.

pub mod tests_go_files;
